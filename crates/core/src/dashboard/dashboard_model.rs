//! Dashboard aggregation models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::AssetCategory;
use crate::holdings::ValuedHolding;

/// Holdings grouped under one asset category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHoldings {
    pub category: AssetCategory,
    pub label: String,
    pub holdings: Vec<ValuedHolding>,
}

/// One slice of the allocation doughnut: category label and the number of
/// holdings in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub label: String,
    pub count: usize,
}

/// Aggregated view over every portfolio of one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_net_worth: Decimal,
    pub total_invested: Decimal,
    /// Net worth delta versus yesterday's recorded history; 0 when no
    /// history row exists for yesterday.
    pub daily_variation: Decimal,
    pub daily_variation_percent: Decimal,
    /// Non-empty categories, in the fixed category order.
    pub holdings_by_category: Vec<CategoryHoldings>,
    pub allocation: Vec<AllocationSlice>,
}
