//! Quotes module - scheduled price refresh through the market-data providers.

mod price_service;

// Re-export the public interface
pub use price_service::{PriceRefreshSummary, PriceService, PriceServiceTrait};
