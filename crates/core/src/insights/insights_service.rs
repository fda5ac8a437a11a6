use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::assets::AssetCategory;
use crate::errors::Result;
use crate::holdings::HoldingsServiceTrait;
use crate::insights::insights_model::{AssetWeight, CategoryWeight, InsightsReport};
use crate::portfolios::PortfolioRepositoryTrait;

/// Fixed risk factor per category, 0-100 scale.
const fn risk_factor(category: AssetCategory) -> Decimal {
    match category {
        AssetCategory::Crypto => dec!(90),
        AssetCategory::Stocks => dec!(60),
        AssetCategory::RealEstate => dec!(35),
        AssetCategory::Fiat => dec!(5),
    }
}

/// Trait for insight computation.
#[async_trait]
pub trait InsightsServiceTrait: Send + Sync {
    fn insights(&self, user_id: &str) -> Result<InsightsReport>;
}

/// Derives diversification and risk scores from a user's combined holdings.
pub struct InsightsService {
    portfolios: Arc<dyn PortfolioRepositoryTrait>,
    holdings: Arc<dyn HoldingsServiceTrait>,
}

impl InsightsService {
    pub fn new(
        portfolios: Arc<dyn PortfolioRepositoryTrait>,
        holdings: Arc<dyn HoldingsServiceTrait>,
    ) -> Self {
        Self {
            portfolios,
            holdings,
        }
    }
}

#[async_trait]
impl InsightsServiceTrait for InsightsService {
    fn insights(&self, user_id: &str) -> Result<InsightsReport> {
        let portfolio_ids: Vec<String> = self
            .portfolios
            .list_by_user(user_id)?
            .into_iter()
            .map(|p| p.id)
            .collect();
        let valued = self.holdings.valued_holdings_for_portfolios(&portfolio_ids)?;

        // The same asset held in several portfolios counts as one position.
        let mut by_asset: HashMap<String, AssetWeight> = HashMap::new();
        let mut by_category: HashMap<AssetCategory, Decimal> = HashMap::new();
        let mut total = Decimal::ZERO;
        for holding in &valued {
            total += holding.current_value;
            *by_category.entry(holding.category).or_default() += holding.current_value;
            by_asset
                .entry(holding.asset_id.clone())
                .and_modify(|w| w.value += holding.current_value)
                .or_insert_with(|| AssetWeight {
                    ticker: holding.ticker.clone(),
                    name: holding.name.clone(),
                    value: holding.current_value,
                    weight_percent: Decimal::ZERO,
                });
        }

        if total <= Decimal::ZERO {
            return Ok(InsightsReport {
                diversification_score: Decimal::ZERO,
                risk_score: Decimal::ZERO,
                concentration: Vec::new(),
                category_weights: Vec::new(),
            });
        }

        let mut concentration: Vec<AssetWeight> = by_asset.into_values().collect();
        for weight in &mut concentration {
            weight.weight_percent = weight.value / total * Decimal::ONE_HUNDRED;
        }
        concentration.sort_by(|a, b| b.value.cmp(&a.value));

        let largest = concentration
            .first()
            .map(|w| w.value)
            .unwrap_or(Decimal::ZERO);
        let diversification_score =
            Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED * largest / total;

        let mut category_weights = Vec::new();
        let mut risk_score = Decimal::ZERO;
        for category in AssetCategory::ALL {
            let Some(value) = by_category.get(&category).copied() else {
                continue;
            };
            let weight = value / total;
            risk_score += weight * risk_factor(category);
            category_weights.push(CategoryWeight {
                category,
                label: category.display_label().to_string(),
                value,
                weight_percent: weight * Decimal::ONE_HUNDRED,
            });
        }

        Ok(InsightsReport {
            diversification_score,
            risk_score,
            concentration,
            category_weights,
        })
    }
}
