//! Holdings module - positions, weighted-average merges, valuation.

mod holdings_model;
mod holdings_service;
mod holdings_traits;

#[cfg(test)]
mod holdings_service_tests;

// Re-export the public interface
pub use holdings_model::{Holding, HoldingSource, NewHolding, ValuedHolding};
pub use holdings_service::HoldingsService;
pub use holdings_traits::{HoldingRepositoryTrait, HoldingsServiceTrait};
