use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{error, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use networth_market_data::{InstrumentKind, MarketDataClient};

use crate::assets::{Asset, AssetCategory, AssetRepositoryTrait};
use crate::errors::Result;

/// Outcome of one price refresh pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRefreshSummary {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Trait for the price refresh service.
#[async_trait]
pub trait PriceServiceTrait: Send + Sync {
    /// Refreshes current prices for every stock and crypto asset.
    /// Per-asset failures are logged and skipped.
    async fn refresh_all_prices(&self) -> Result<PriceRefreshSummary>;
}

/// Pulls latest prices from the market-data client and persists them.
pub struct PriceService {
    assets: Arc<dyn AssetRepositoryTrait>,
    market_data: Arc<MarketDataClient>,
}

impl PriceService {
    pub fn new(assets: Arc<dyn AssetRepositoryTrait>, market_data: Arc<MarketDataClient>) -> Self {
        Self {
            assets,
            market_data,
        }
    }

    async fn refresh_one(&self, asset: &Asset, kind: InstrumentKind) -> RefreshOutcome {
        match self.market_data.latest_price(&asset.ticker, kind).await {
            Ok(quote) if quote.price > Decimal::ZERO => {
                let as_of = Utc::now().naive_utc();
                match self
                    .assets
                    .update_price(&asset.ticker, quote.price, as_of)
                    .await
                {
                    Ok(()) => RefreshOutcome::Updated,
                    Err(e) => {
                        error!("Error saving price for {}: {}", asset.ticker, e);
                        RefreshOutcome::Failed
                    }
                }
            }
            Ok(_) => {
                warn!("Ignoring non-positive price for {}", asset.ticker);
                RefreshOutcome::Skipped
            }
            Err(e) => {
                error!("Error updating {}: {}", asset.ticker, e);
                RefreshOutcome::Failed
            }
        }
    }
}

enum RefreshOutcome {
    Updated,
    Skipped,
    Failed,
}

#[async_trait]
impl PriceServiceTrait for PriceService {
    async fn refresh_all_prices(&self) -> Result<PriceRefreshSummary> {
        let assets = self.assets.list()?;
        if assets.is_empty() {
            info!("No assets to update");
            return Ok(PriceRefreshSummary::default());
        }
        info!("Updating prices for {} assets", assets.len());

        let mut summary = PriceRefreshSummary::default();
        for asset in &assets {
            // Fiat and real-estate assets have no market feed.
            let kind = match asset.category {
                AssetCategory::Stocks => InstrumentKind::Equity,
                AssetCategory::Crypto => InstrumentKind::Crypto,
                AssetCategory::Fiat | AssetCategory::RealEstate => {
                    summary.skipped += 1;
                    continue;
                }
            };
            match self.refresh_one(asset, kind).await {
                RefreshOutcome::Updated => summary.updated += 1,
                RefreshOutcome::Skipped => summary.skipped += 1,
                RefreshOutcome::Failed => summary.failed += 1,
            }
        }
        info!(
            "Asset prices updated: {} updated, {} skipped, {} failed",
            summary.updated, summary.skipped, summary.failed
        );
        Ok(summary)
    }
}
