//! Market data access for networth.
//!
//! Thin wrappers around third-party pricing APIs:
//! - Yahoo Finance for stocks/ETFs/funds, symbol search and profiles
//! - the Binance public ticker endpoint for cryptocurrencies
//!
//! [`MarketDataClient`] fronts the providers with an in-process TTL quote
//! cache and a static fallback table consulted when a provider call fails.
//! There is no retry, backoff or circuit breaking: errors are logged and the
//! caller gets the fallback value or the error.

pub mod cache;
pub mod client;
pub mod errors;
pub mod fallback;
pub mod models;
pub mod provider;

pub use cache::QuoteCache;
pub use client::MarketDataClient;
pub use errors::MarketDataError;
pub use models::{InstrumentKind, Quote, SearchResult};
pub use provider::{BinanceProvider, MarketDataProvider, YahooProvider};
