use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::assets::AssetCategory;
use crate::errors::{DatabaseError, Error, Result};
use crate::holdings::{Holding, HoldingSource, HoldingsServiceTrait, NewHolding, ValuedHolding};
use crate::insights::{InsightsService, InsightsServiceTrait};
use crate::portfolios::{NewPortfolio, Portfolio, PortfolioRepositoryTrait};

struct MockPortfolioRepository {
    portfolios: Vec<Portfolio>,
}

#[async_trait]
impl PortfolioRepositoryTrait for MockPortfolioRepository {
    fn get_by_id(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.portfolios
            .iter()
            .find(|p| p.id == portfolio_id)
            .cloned()
            .ok_or_else(|| Error::Database(DatabaseError::NotFound("missing".to_string())))
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        Ok(self
            .portfolios
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Portfolio>> {
        Ok(self.portfolios.clone())
    }

    async fn create(&self, _user_id: &str, _new_portfolio: NewPortfolio) -> Result<Portfolio> {
        unimplemented!("not used by insights tests")
    }

    async fn delete(&self, _portfolio_id: &str) -> Result<usize> {
        unimplemented!("not used by insights tests")
    }
}

struct MockHoldingsService {
    valued: Vec<ValuedHolding>,
}

#[async_trait]
impl HoldingsServiceTrait for MockHoldingsService {
    async fn add_holding(&self, _portfolio_id: &str, _new_holding: NewHolding) -> Result<Holding> {
        unimplemented!("not used by insights tests")
    }

    async fn delete_holding(&self, _user_id: &str, _holding_id: &str) -> Result<usize> {
        unimplemented!("not used by insights tests")
    }

    fn valued_holdings_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<ValuedHolding>> {
        Ok(self
            .valued
            .iter()
            .filter(|h| h.portfolio_id == portfolio_id)
            .cloned()
            .collect())
    }

    fn valued_holdings_for_portfolios(
        &self,
        portfolio_ids: &[String],
    ) -> Result<Vec<ValuedHolding>> {
        Ok(self
            .valued
            .iter()
            .filter(|h| portfolio_ids.contains(&h.portfolio_id))
            .cloned()
            .collect())
    }
}

fn valued(
    portfolio_id: &str,
    asset_id: &str,
    category: AssetCategory,
    current_value: Decimal,
) -> ValuedHolding {
    ValuedHolding {
        id: format!("h-{}-{}", portfolio_id, asset_id),
        portfolio_id: portfolio_id.to_string(),
        asset_id: asset_id.to_string(),
        ticker: asset_id.to_uppercase(),
        name: asset_id.to_string(),
        category,
        quantity: dec!(1),
        average_buy_price: Decimal::ZERO,
        source: HoldingSource::Manual,
        current_price: current_value,
        current_value,
        invested_value: Decimal::ZERO,
        pnl: current_value,
        pnl_percent: Decimal::ZERO,
    }
}

fn service(valued: Vec<ValuedHolding>) -> InsightsService {
    InsightsService::new(
        Arc::new(MockPortfolioRepository {
            portfolios: vec![
                Portfolio {
                    id: "p1".to_string(),
                    user_id: "u1".to_string(),
                    name: "Main".to_string(),
                    currency: "EUR".to_string(),
                },
                Portfolio {
                    id: "p2".to_string(),
                    user_id: "u1".to_string(),
                    name: "Side".to_string(),
                    currency: "EUR".to_string(),
                },
            ],
        }),
        Arc::new(MockHoldingsService { valued }),
    )
}

#[test]
fn diversification_score_reflects_largest_position() {
    let report = service(vec![
        valued("p1", "aapl", AssetCategory::Stocks, dec!(750)),
        valued("p1", "btc", AssetCategory::Crypto, dec!(250)),
    ])
    .insights("u1")
    .unwrap();

    // Largest position is 75% of the book -> score 25.
    assert_eq!(report.diversification_score, dec!(25));
    assert_eq!(report.concentration.len(), 2);
    assert_eq!(report.concentration[0].ticker, "AAPL");
    assert_eq!(report.concentration[0].weight_percent, dec!(75));
}

#[test]
fn same_asset_across_portfolios_counts_once() {
    let report = service(vec![
        valued("p1", "btc", AssetCategory::Crypto, dec!(400)),
        valued("p2", "btc", AssetCategory::Crypto, dec!(600)),
    ])
    .insights("u1")
    .unwrap();

    assert_eq!(report.concentration.len(), 1);
    assert_eq!(report.concentration[0].value, dec!(1000));
    // Single asset -> fully concentrated.
    assert_eq!(report.diversification_score, Decimal::ZERO);
}

#[test]
fn risk_score_is_value_weighted() {
    let report = service(vec![
        valued("p1", "aapl", AssetCategory::Stocks, dec!(500)),
        valued("p1", "btc", AssetCategory::Crypto, dec!(500)),
    ])
    .insights("u1")
    .unwrap();

    // 0.5 * 60 + 0.5 * 90 = 75
    assert_eq!(report.risk_score, dec!(75));
    assert_eq!(report.category_weights.len(), 2);
    assert_eq!(report.category_weights[0].weight_percent, dec!(50));
}

#[test]
fn empty_book_scores_zero() {
    let report = service(Vec::new()).insights("u1").unwrap();
    assert_eq!(report.diversification_score, Decimal::ZERO);
    assert_eq!(report.risk_score, Decimal::ZERO);
    assert!(report.concentration.is_empty());
    assert!(report.category_weights.is_empty());
}
