//! Client wrapper: cache first, then provider, then static fallback.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::cache::QuoteCache;
use crate::errors::MarketDataError;
use crate::fallback;
use crate::models::{InstrumentKind, Quote, SearchResult};
use crate::provider::{BinanceProvider, MarketDataProvider, YahooProvider};

/// Default time-to-live for cached quotes.
pub const DEFAULT_QUOTE_TTL: Duration = Duration::from_secs(300);

/// Front door for all outbound market data.
///
/// Routes by instrument kind: equities to Yahoo, crypto to Binance. Every
/// successful quote is cached; on provider failure the static fallback table
/// answers when it can.
pub struct MarketDataClient {
    equity: Arc<dyn MarketDataProvider>,
    crypto: Arc<dyn MarketDataProvider>,
    cache: QuoteCache,
}

impl MarketDataClient {
    /// Builds the production client (Yahoo + Binance, default TTL).
    pub async fn new() -> Result<Self, MarketDataError> {
        let yahoo = YahooProvider::new().await?;
        Ok(Self::with_providers(
            Arc::new(yahoo),
            Arc::new(BinanceProvider::new()),
            DEFAULT_QUOTE_TTL,
        ))
    }

    /// Builds a client over arbitrary providers. Used by tests.
    pub fn with_providers(
        equity: Arc<dyn MarketDataProvider>,
        crypto: Arc<dyn MarketDataProvider>,
        quote_ttl: Duration,
    ) -> Self {
        Self {
            equity,
            crypto,
            cache: QuoteCache::new(quote_ttl),
        }
    }

    fn provider_for(&self, kind: InstrumentKind) -> &Arc<dyn MarketDataProvider> {
        match kind {
            InstrumentKind::Equity => &self.equity,
            InstrumentKind::Crypto => &self.crypto,
        }
    }

    /// Latest price for `ticker`, served from cache when fresh.
    pub async fn latest_price(
        &self,
        ticker: &str,
        kind: InstrumentKind,
    ) -> Result<Quote, MarketDataError> {
        if let Some(quote) = self.cache.get(ticker) {
            debug!("Cache hit for {}", ticker);
            return Ok(quote);
        }

        let provider = self.provider_for(kind);
        match provider.latest_price(ticker).await {
            Ok(quote) => {
                self.cache.insert(quote.clone());
                Ok(quote)
            }
            Err(e) => match fallback::price(ticker) {
                Some(price) => {
                    warn!(
                        "Provider {} failed for {} ({}); using fallback price",
                        provider.id(),
                        ticker,
                        e
                    );
                    Ok(Quote {
                        symbol: ticker.to_string(),
                        price,
                        as_of: Utc::now(),
                        source: "FALLBACK".to_string(),
                    })
                }
                None => Err(e),
            },
        }
    }

    /// Symbol search (Yahoo); falls back to the static table on failure.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        match self.equity.search(query).await {
            Ok(results) => Ok(results),
            Err(e) => {
                warn!("Search failed for '{}' ({}); using fallback table", query, e);
                Ok(fallback::search(query))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticProvider {
        id: &'static str,
        price: Option<rust_decimal::Decimal>,
        calls: AtomicUsize,
    }

    impl StaticProvider {
        fn priced(id: &'static str, price: rust_decimal::Decimal) -> Self {
            Self {
                id,
                price: Some(price),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(id: &'static str) -> Self {
            Self {
                id,
                price: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for StaticProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn latest_price(&self, symbol: &str) -> Result<Quote, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.price {
                Some(price) => Ok(Quote {
                    symbol: symbol.to_string(),
                    price,
                    as_of: Utc::now(),
                    source: self.id.to_string(),
                }),
                None => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn caches_successful_quotes() {
        let equity = Arc::new(StaticProvider::priced("EQ", dec!(10)));
        let client = MarketDataClient::with_providers(
            equity.clone(),
            Arc::new(StaticProvider::failing("CR")),
            Duration::from_secs(60),
        );

        let first = client
            .latest_price("AAPL", InstrumentKind::Equity)
            .await
            .unwrap();
        let second = client
            .latest_price("AAPL", InstrumentKind::Equity)
            .await
            .unwrap();
        assert_eq!(first.price, dec!(10));
        assert_eq!(second.price, dec!(10));
        assert_eq!(equity.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn falls_back_to_static_table_on_provider_error() {
        let client = MarketDataClient::with_providers(
            Arc::new(StaticProvider::failing("EQ")),
            Arc::new(StaticProvider::failing("CR")),
            Duration::from_secs(60),
        );

        let quote = client
            .latest_price("BTC-USD", InstrumentKind::Crypto)
            .await
            .unwrap();
        assert_eq!(quote.price, dec!(65000.00));
        assert_eq!(quote.source, "FALLBACK");

        let err = client
            .latest_price("OBSCURE", InstrumentKind::Equity)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn routes_crypto_to_the_crypto_provider() {
        let crypto = Arc::new(StaticProvider::priced("CR", dec!(123)));
        let client = MarketDataClient::with_providers(
            Arc::new(StaticProvider::failing("EQ")),
            crypto.clone(),
            Duration::from_secs(60),
        );

        let quote = client
            .latest_price("ETH-USD", InstrumentKind::Crypto)
            .await
            .unwrap();
        assert_eq!(quote.source, "CR");
        assert_eq!(crypto.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn search_falls_back_to_static_table() {
        let client = MarketDataClient::with_providers(
            Arc::new(StaticProvider::failing("EQ")),
            Arc::new(StaticProvider::failing("CR")),
            Duration::from_secs(60),
        );

        let results = client.search("apple").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "AAPL");
    }
}
