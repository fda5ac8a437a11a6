//! Insights module - diversification and risk scoring.

mod insights_model;
mod insights_service;

#[cfg(test)]
mod insights_service_tests;

// Re-export the public interface
pub use insights_model::{AssetWeight, CategoryWeight, InsightsReport};
pub use insights_service::{InsightsService, InsightsServiceTrait};
