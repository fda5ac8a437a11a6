//! Dashboard module - aggregated net worth across a user's portfolios.

mod dashboard_model;
mod dashboard_service;


// Re-export the public interface
pub use dashboard_model::{AllocationSlice, CategoryHoldings, DashboardSummary};
pub use dashboard_service::{DashboardService, DashboardServiceTrait};
