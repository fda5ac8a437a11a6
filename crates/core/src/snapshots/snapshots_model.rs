//! Portfolio history snapshot models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One (portfolio, date) snapshot of total and invested value.
///
/// Unique on the (portfolio, date) pair; the daily job upserts by that
/// natural key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub id: String,
    pub portfolio_id: String,
    pub date: NaiveDate,
    pub total_value: Decimal,
    pub invested_value: Decimal,
}

/// Outcome of one snapshot run across all portfolios.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRunSummary {
    pub snapshots: usize,
    pub failed: usize,
}
