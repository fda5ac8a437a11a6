//! Diversification and risk scoring models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetCategory;

/// One asset's share of the total book, across all portfolios.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetWeight {
    pub ticker: String,
    pub name: String,
    pub value: Decimal,
    pub weight_percent: Decimal,
}

/// One category's share of the total book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWeight {
    pub category: AssetCategory,
    pub label: String,
    pub value: Decimal,
    pub weight_percent: Decimal,
}

/// Diversification/risk report over a user's combined holdings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    /// 100 - 100 x (largest single-asset value / total value); 0 for an
    /// empty book.
    pub diversification_score: Decimal,
    /// Value-weighted mean of per-category risk factors; 0 for an empty book.
    pub risk_score: Decimal,
    /// Per-asset weights, heaviest first.
    pub concentration: Vec<AssetWeight>,
    pub category_weights: Vec<CategoryWeight>,
}
