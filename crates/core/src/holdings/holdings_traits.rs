use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::holdings::holdings_model::{Holding, NewHolding, ValuedHolding};

/// Trait for holding repository operations.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    fn get_by_id(&self, holding_id: &str) -> Result<Holding>;
    fn list_by_portfolio(&self, portfolio_id: &str) -> Result<Vec<Holding>>;
    fn list_by_portfolios(&self, portfolio_ids: &[String]) -> Result<Vec<Holding>>;
    fn find_by_portfolio_and_asset(
        &self,
        portfolio_id: &str,
        asset_id: &str,
    ) -> Result<Option<Holding>>;
    async fn insert(&self, portfolio_id: &str, new_holding: NewHolding) -> Result<Holding>;
    /// Rewrites quantity and average buy price of an existing position.
    async fn update_position(
        &self,
        holding_id: &str,
        quantity: Decimal,
        average_buy_price: Decimal,
    ) -> Result<Holding>;
    async fn delete(&self, holding_id: &str) -> Result<usize>;
}

/// Trait for holding service operations.
#[async_trait]
pub trait HoldingsServiceTrait: Send + Sync {
    /// Adds a position, merging with an existing one for the same asset via
    /// weighted-average cost.
    async fn add_holding(&self, portfolio_id: &str, new_holding: NewHolding) -> Result<Holding>;
    /// Deletes a holding after checking it belongs to one of `user_id`'s
    /// portfolios.
    async fn delete_holding(&self, user_id: &str, holding_id: &str) -> Result<usize>;
    fn valued_holdings_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<ValuedHolding>>;
    fn valued_holdings_for_portfolios(
        &self,
        portfolio_ids: &[String],
    ) -> Result<Vec<ValuedHolding>>;
}
