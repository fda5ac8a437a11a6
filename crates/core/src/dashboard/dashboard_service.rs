use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::assets::AssetCategory;
use crate::dashboard::dashboard_model::{AllocationSlice, CategoryHoldings, DashboardSummary};
use crate::errors::Result;
use crate::holdings::HoldingsServiceTrait;
use crate::portfolios::PortfolioRepositoryTrait;
use crate::snapshots::SnapshotRepositoryTrait;

/// Trait for dashboard aggregation.
#[async_trait]
pub trait DashboardServiceTrait: Send + Sync {
    /// Aggregates all of a user's portfolios as of `today`.
    fn dashboard(&self, user_id: &str, today: NaiveDate) -> Result<DashboardSummary>;
}

/// Aggregates net worth, category grouping and daily variation across every
/// portfolio of a user. Single pass over the valued holdings.
pub struct DashboardService {
    portfolios: Arc<dyn PortfolioRepositoryTrait>,
    holdings: Arc<dyn HoldingsServiceTrait>,
    snapshots: Arc<dyn SnapshotRepositoryTrait>,
}

impl DashboardService {
    pub fn new(
        portfolios: Arc<dyn PortfolioRepositoryTrait>,
        holdings: Arc<dyn HoldingsServiceTrait>,
        snapshots: Arc<dyn SnapshotRepositoryTrait>,
    ) -> Self {
        Self {
            portfolios,
            holdings,
            snapshots,
        }
    }
}

#[async_trait]
impl DashboardServiceTrait for DashboardService {
    fn dashboard(&self, user_id: &str, today: NaiveDate) -> Result<DashboardSummary> {
        let portfolio_ids: Vec<String> = self
            .portfolios
            .list_by_user(user_id)?
            .into_iter()
            .map(|p| p.id)
            .collect();
        let valued = self.holdings.valued_holdings_for_portfolios(&portfolio_ids)?;

        let mut total_net_worth = Decimal::ZERO;
        let mut total_invested = Decimal::ZERO;
        for holding in &valued {
            total_net_worth += holding.current_value;
            total_invested += holding.invested_value;
        }

        // Group in fixed category order, dropping empty categories.
        let mut holdings_by_category = Vec::new();
        let mut allocation = Vec::new();
        for category in AssetCategory::ALL {
            let holdings: Vec<_> = valued
                .iter()
                .filter(|h| h.category == category)
                .cloned()
                .collect();
            if holdings.is_empty() {
                continue;
            }
            let label = category.display_label().to_string();
            allocation.push(AllocationSlice {
                label: label.clone(),
                count: holdings.len(),
            });
            holdings_by_category.push(CategoryHoldings {
                category,
                label,
                holdings,
            });
        }

        // Daily variation against yesterday's snapshot sum. An approximation
        // when portfolios changed overnight.
        let yesterday = today - Duration::days(1);
        let last_total = self
            .snapshots
            .sum_total_value_on(&portfolio_ids, yesterday)?
            .unwrap_or(Decimal::ZERO);
        let (daily_variation, daily_variation_percent) = if last_total > Decimal::ZERO {
            let variation = total_net_worth - last_total;
            (variation, variation / last_total * Decimal::ONE_HUNDRED)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        Ok(DashboardSummary {
            total_net_worth,
            total_invested,
            daily_variation,
            daily_variation_percent,
            holdings_by_category,
            allocation,
        })
    }
}
