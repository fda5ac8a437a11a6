//! Core domain logic for networth.
//!
//! This crate is database-agnostic: repositories are traits implemented by
//! `networth-storage-sqlite`, and all valuation/aggregation arithmetic lives
//! in the services defined here.

pub mod assets;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod holdings;
pub mod insights;
pub mod portfolios;
pub mod quotes;
pub mod snapshots;
pub mod transactions;
pub mod users;

pub use errors::{Error, Result};
