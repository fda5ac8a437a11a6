use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::assets::assets_model::{Asset, AssetCategory, AssetSearchHit, NewAsset};
use crate::errors::Result;

/// Trait for asset repository operations.
#[async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    fn get_by_id(&self, asset_id: &str) -> Result<Asset>;
    fn get_by_ticker(&self, ticker: &str) -> Result<Option<Asset>>;
    /// All assets, ordered by (category, name).
    fn list(&self) -> Result<Vec<Asset>>;
    fn list_by_ids(&self, asset_ids: &[String]) -> Result<Vec<Asset>>;
    async fn upsert(&self, new_asset: NewAsset) -> Result<Asset>;
    async fn update_price(&self, ticker: &str, price: Decimal, as_of: NaiveDateTime)
        -> Result<()>;
}

/// Trait for asset service operations.
#[async_trait]
pub trait AssetServiceTrait: Send + Sync {
    fn list_assets(&self) -> Result<Vec<Asset>>;
    fn get_asset(&self, asset_id: &str) -> Result<Asset>;
    /// Searches the market-data providers for assets matching `query`.
    async fn search_online(&self, query: &str) -> Result<Vec<AssetSearchHit>>;
    /// Fetches price and profile for `ticker` online and upserts the asset.
    async fn add_from_ticker(
        &self,
        ticker: &str,
        category: Option<AssetCategory>,
    ) -> Result<Asset>;
}
