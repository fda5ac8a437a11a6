use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::snapshots::snapshots_model::{PortfolioSnapshot, SnapshotRunSummary};

/// Trait for portfolio history repository operations.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// History rows for one portfolio, newest first.
    fn history_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<PortfolioSnapshot>>;
    /// Sum of the total values recorded for `date` across the given
    /// portfolios. `None` when no portfolio has a row for that date.
    fn sum_total_value_on(
        &self,
        portfolio_ids: &[String],
        date: NaiveDate,
    ) -> Result<Option<Decimal>>;
    /// Inserts or updates the row for (portfolio, date).
    async fn upsert(
        &self,
        portfolio_id: &str,
        date: NaiveDate,
        total_value: Decimal,
        invested_value: Decimal,
    ) -> Result<PortfolioSnapshot>;
}

/// Trait for snapshot service operations.
#[async_trait]
pub trait SnapshotServiceTrait: Send + Sync {
    /// Recomputes and upserts a snapshot of every portfolio for `date`.
    /// Per-portfolio failures are logged and skipped.
    async fn snapshot_all(&self, date: NaiveDate) -> Result<SnapshotRunSummary>;
    /// History rows for an owned portfolio, newest first.
    fn portfolio_history(
        &self,
        user_id: &str,
        portfolio_id: &str,
    ) -> Result<Vec<PortfolioSnapshot>>;
    /// Generates `days` days of synthetic history ending yesterday for every
    /// portfolio. Returns the number of rows written.
    async fn backfill_history(&self, today: NaiveDate, days: u32) -> Result<usize>;
}
