use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error};
use rust_decimal::Decimal;

use networth_market_data::{InstrumentKind, MarketDataClient};

use crate::assets::assets_model::{Asset, AssetCategory, AssetSearchHit, NewAsset};
use crate::assets::assets_traits::{AssetRepositoryTrait, AssetServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for asset lookups and online search/enrichment.
pub struct AssetService {
    repository: Arc<dyn AssetRepositoryTrait>,
    market_data: Arc<MarketDataClient>,
}

impl AssetService {
    pub fn new(
        repository: Arc<dyn AssetRepositoryTrait>,
        market_data: Arc<MarketDataClient>,
    ) -> Self {
        Self {
            repository,
            market_data,
        }
    }

    /// Looks up name and category for a ticker via the search endpoint.
    ///
    /// Failures are tolerated: the caller falls back to the raw ticker.
    async fn lookup_profile(&self, ticker: &str) -> (Option<String>, Option<AssetCategory>) {
        match self.market_data.search(ticker).await {
            Ok(results) => results
                .iter()
                .find(|r| r.symbol.eq_ignore_ascii_case(ticker))
                .map(|r| {
                    (
                        Some(r.display_name().to_string()),
                        AssetCategory::from_quote_type(&r.quote_type),
                    )
                })
                .unwrap_or((None, None)),
            Err(e) => {
                debug!("Profile lookup failed for {}: {}", ticker, e);
                (None, None)
            }
        }
    }
}

#[async_trait]
impl AssetServiceTrait for AssetService {
    fn list_assets(&self) -> Result<Vec<Asset>> {
        self.repository.list()
    }

    fn get_asset(&self, asset_id: &str) -> Result<Asset> {
        self.repository.get_by_id(asset_id)
    }

    async fn search_online(&self, query: &str) -> Result<Vec<AssetSearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let results = match self.market_data.search(query).await {
            Ok(results) => results,
            Err(e) => {
                error!("Error searching market data for {}: {}", query, e);
                return Ok(Vec::new());
            }
        };

        let mut hits = Vec::new();
        for item in results {
            // Only stocks/ETFs/funds and cryptocurrencies are supported.
            let Some(category) = AssetCategory::from_quote_type(&item.quote_type) else {
                continue;
            };
            let exists = self.repository.get_by_ticker(&item.symbol)?.is_some();
            hits.push(AssetSearchHit {
                ticker: item.symbol.clone(),
                name: item.display_name().to_string(),
                category,
                exists,
            });
        }
        Ok(hits)
    }

    async fn add_from_ticker(
        &self,
        ticker: &str,
        category: Option<AssetCategory>,
    ) -> Result<Asset> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(ValidationError::MissingField("ticker".to_string()).into());
        }

        let quote = self
            .market_data
            .latest_price(ticker, InstrumentKind::Equity)
            .await
            .map_err(|e| {
                error!("Error creating asset {}: {}", ticker, e);
                Error::Asset(format!("unable to fetch a price for {}", ticker))
            })?;
        if quote.price <= Decimal::ZERO {
            return Err(Error::Asset(format!("no price data for {}", ticker)));
        }

        let (name, inferred) = self.lookup_profile(ticker).await;
        let category = category
            .or(inferred)
            // Mirrors the quote-type inference: anything non-crypto is a stock.
            .unwrap_or(AssetCategory::Stocks);

        self.repository
            .upsert(NewAsset {
                ticker: ticker.to_string(),
                name: name.unwrap_or_else(|| ticker.to_string()),
                category,
                current_price: quote.price,
            })
            .await
    }
}
