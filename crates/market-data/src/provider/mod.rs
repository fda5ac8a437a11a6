//! Market data providers.

mod binance;
mod traits;
mod yahoo;

pub use binance::BinanceProvider;
pub use traits::MarketDataProvider;
pub use yahoo::YahooProvider;
