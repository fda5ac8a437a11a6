//! Snapshots module - daily portfolio value history.

mod snapshots_model;
mod snapshots_service;
mod snapshots_traits;


// Re-export the public interface
pub use snapshots_model::{PortfolioSnapshot, SnapshotRunSummary};
pub use snapshots_service::SnapshotService;
pub use snapshots_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};
