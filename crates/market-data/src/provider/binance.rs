//! Binance public ticker provider for cryptocurrencies.
//!
//! Uses the unauthenticated `/api/v3/ticker/price` endpoint. No API key is
//! required for spot prices.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "BINANCE";
const BASE_URL: &str = "https://api.binance.com";

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

/// Binance spot ticker provider.
pub struct BinanceProvider {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceProvider {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Normalizes a stored ticker into a Binance pair symbol.
    ///
    /// Accepts exchange-style pairs ("BTC/USDT"), Yahoo-style pairs
    /// ("BTC-USD") and already-normalized symbols ("ETHUSDT"). A bare USD
    /// quote becomes USDT, which is what the spot endpoint actually lists.
    pub fn normalize_symbol(ticker: &str) -> String {
        let mut symbol: String = ticker
            .trim()
            .to_ascii_uppercase()
            .chars()
            .filter(|c| *c != '/' && *c != '-')
            .collect();
        if symbol.ends_with("USD") {
            symbol.push('T');
        }
        symbol
    }
}

impl Default for BinanceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for BinanceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn latest_price(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let pair = Self::normalize_symbol(symbol);
        debug!("Fetching ticker price for {} ({}) from Binance", symbol, pair);

        let url = format!("{}/api/v3/ticker/price", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", pair.as_str())])
            .send()
            .await?;

        // Binance answers 400 for symbols it does not list.
        if response.status() == reqwest::StatusCode::BAD_REQUEST {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }
        let response =
            response
                .error_for_status()
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        let ticker: TickerPrice =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse ticker response: {}", e),
                })?;

        let price = Decimal::from_str(&ticker.price).map_err(|e| {
            MarketDataError::ValidationFailed {
                message: format!("Invalid price '{}' for {}: {}", ticker.price, pair, e),
            }
        })?;

        Ok(Quote {
            symbol: symbol.to_string(),
            price,
            as_of: Utc::now(),
            source: PROVIDER_ID.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_exchange_pairs() {
        assert_eq!(BinanceProvider::normalize_symbol("BTC/USDT"), "BTCUSDT");
        assert_eq!(BinanceProvider::normalize_symbol("eth/usdt"), "ETHUSDT");
    }

    #[test]
    fn normalizes_yahoo_pairs() {
        assert_eq!(BinanceProvider::normalize_symbol("BTC-USD"), "BTCUSDT");
        assert_eq!(BinanceProvider::normalize_symbol("SOL-USD"), "SOLUSDT");
    }

    #[test]
    fn leaves_normalized_symbols_alone() {
        assert_eq!(BinanceProvider::normalize_symbol("BTCUSDT"), "BTCUSDT");
        assert_eq!(BinanceProvider::normalize_symbol(" btcusdt "), "BTCUSDT");
    }
}
