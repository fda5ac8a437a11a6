//! Shared market data models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which provider family serves an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentKind {
    /// Stocks, ETFs, funds - anything Yahoo quotes.
    Equity,
    /// Cryptocurrencies, priced via the exchange ticker endpoint.
    Crypto,
}

/// A point-in-time price for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    pub as_of: DateTime<Utc>,
    /// Provider id the price came from ("YAHOO", "BINANCE", "FALLBACK").
    pub source: String,
}

/// One row of a symbol search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub symbol: String,
    pub short_name: String,
    pub long_name: String,
    /// Yahoo quote type: EQUITY, ETF, MUTUALFUND, CRYPTOCURRENCY, ...
    pub quote_type: String,
    pub score: f64,
}

impl SearchResult {
    /// Best available display name: short name, then long name, then symbol.
    pub fn display_name(&self) -> &str {
        if !self.short_name.trim().is_empty() {
            &self.short_name
        } else if !self.long_name.trim().is_empty() {
            &self.long_name
        } else {
            &self.symbol
        }
    }
}
