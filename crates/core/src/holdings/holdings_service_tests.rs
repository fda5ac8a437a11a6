use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::assets::{Asset, AssetCategory, AssetRepositoryTrait, NewAsset};
use crate::errors::{DatabaseError, Error, Result};
use crate::holdings::{
    Holding, HoldingRepositoryTrait, HoldingSource, HoldingsService, HoldingsServiceTrait,
    NewHolding,
};
use crate::portfolios::{NewPortfolio, Portfolio, PortfolioRepositoryTrait};

// --- Mock asset repository ---

#[derive(Default)]
struct MockAssetRepository {
    assets: Mutex<HashMap<String, Asset>>,
}

impl MockAssetRepository {
    fn with_asset(self, id: &str, ticker: &str, price: Decimal) -> Self {
        self.assets.lock().unwrap().insert(
            id.to_string(),
            Asset {
                id: id.to_string(),
                ticker: ticker.to_string(),
                name: ticker.to_string(),
                category: AssetCategory::Stocks,
                current_price: price,
                last_updated: Utc::now().naive_utc(),
            },
        );
        self
    }
}

#[async_trait]
impl AssetRepositoryTrait for MockAssetRepository {
    fn get_by_id(&self, asset_id: &str) -> Result<Asset> {
        self.assets
            .lock()
            .unwrap()
            .get(asset_id)
            .cloned()
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Asset {} not found",
                    asset_id
                )))
            })
    }

    fn get_by_ticker(&self, ticker: &str) -> Result<Option<Asset>> {
        Ok(self
            .assets
            .lock()
            .unwrap()
            .values()
            .find(|a| a.ticker == ticker)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Asset>> {
        Ok(self.assets.lock().unwrap().values().cloned().collect())
    }

    fn list_by_ids(&self, asset_ids: &[String]) -> Result<Vec<Asset>> {
        let assets = self.assets.lock().unwrap();
        Ok(asset_ids
            .iter()
            .filter_map(|id| assets.get(id).cloned())
            .collect())
    }

    async fn upsert(&self, _new_asset: NewAsset) -> Result<Asset> {
        unimplemented!("not used by holdings tests")
    }

    async fn update_price(
        &self,
        _ticker: &str,
        _price: Decimal,
        _as_of: chrono::NaiveDateTime,
    ) -> Result<()> {
        unimplemented!("not used by holdings tests")
    }
}

// --- Mock portfolio repository ---

#[derive(Default)]
struct MockPortfolioRepository {
    portfolios: Mutex<Vec<Portfolio>>,
}

impl MockPortfolioRepository {
    fn with_portfolio(self, id: &str, user_id: &str) -> Self {
        self.portfolios.lock().unwrap().push(Portfolio {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: format!("Portfolio {}", id),
            currency: "EUR".to_string(),
        });
        self
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for MockPortfolioRepository {
    fn get_by_id(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.portfolios
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == portfolio_id)
            .cloned()
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Portfolio {} not found",
                    portfolio_id
                )))
            })
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        Ok(self
            .portfolios
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Portfolio>> {
        Ok(self.portfolios.lock().unwrap().clone())
    }

    async fn create(&self, _user_id: &str, _new_portfolio: NewPortfolio) -> Result<Portfolio> {
        unimplemented!("not used by holdings tests")
    }

    async fn delete(&self, _portfolio_id: &str) -> Result<usize> {
        unimplemented!("not used by holdings tests")
    }
}

// --- Mock holding repository ---

#[derive(Default)]
struct MockHoldingRepository {
    holdings: Mutex<Vec<Holding>>,
    next_id: Mutex<u32>,
}

#[async_trait]
impl HoldingRepositoryTrait for MockHoldingRepository {
    fn get_by_id(&self, holding_id: &str) -> Result<Holding> {
        self.holdings
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.id == holding_id)
            .cloned()
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Holding {} not found",
                    holding_id
                )))
            })
    }

    fn list_by_portfolio(&self, portfolio_id: &str) -> Result<Vec<Holding>> {
        Ok(self
            .holdings
            .lock()
            .unwrap()
            .iter()
            .filter(|h| h.portfolio_id == portfolio_id)
            .cloned()
            .collect())
    }

    fn list_by_portfolios(&self, portfolio_ids: &[String]) -> Result<Vec<Holding>> {
        Ok(self
            .holdings
            .lock()
            .unwrap()
            .iter()
            .filter(|h| portfolio_ids.contains(&h.portfolio_id))
            .cloned()
            .collect())
    }

    fn find_by_portfolio_and_asset(
        &self,
        portfolio_id: &str,
        asset_id: &str,
    ) -> Result<Option<Holding>> {
        Ok(self
            .holdings
            .lock()
            .unwrap()
            .iter()
            .find(|h| h.portfolio_id == portfolio_id && h.asset_id == asset_id)
            .cloned())
    }

    async fn insert(&self, portfolio_id: &str, new_holding: NewHolding) -> Result<Holding> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let holding = Holding {
            id: format!("h-{}", next_id),
            portfolio_id: portfolio_id.to_string(),
            asset_id: new_holding.asset_id,
            quantity: new_holding.quantity,
            average_buy_price: new_holding.average_buy_price,
            source: new_holding.source,
        };
        self.holdings.lock().unwrap().push(holding.clone());
        Ok(holding)
    }

    async fn update_position(
        &self,
        holding_id: &str,
        quantity: Decimal,
        average_buy_price: Decimal,
    ) -> Result<Holding> {
        let mut holdings = self.holdings.lock().unwrap();
        let holding = holdings
            .iter_mut()
            .find(|h| h.id == holding_id)
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Holding {} not found",
                    holding_id
                )))
            })?;
        holding.quantity = quantity;
        holding.average_buy_price = average_buy_price;
        Ok(holding.clone())
    }

    async fn delete(&self, holding_id: &str) -> Result<usize> {
        let mut holdings = self.holdings.lock().unwrap();
        let before = holdings.len();
        holdings.retain(|h| h.id != holding_id);
        Ok(before - holdings.len())
    }
}

fn service_with(
    assets: MockAssetRepository,
    portfolios: MockPortfolioRepository,
) -> HoldingsService {
    HoldingsService::new(
        Arc::new(MockHoldingRepository::default()),
        Arc::new(assets),
        Arc::new(portfolios),
    )
}

fn new_holding(asset_id: &str, quantity: Decimal, price: Decimal) -> NewHolding {
    NewHolding {
        asset_id: asset_id.to_string(),
        quantity,
        average_buy_price: price,
        source: HoldingSource::Manual,
    }
}

#[tokio::test]
async fn add_holding_inserts_first_position() {
    let service = service_with(
        MockAssetRepository::default().with_asset("a1", "AAPL", dec!(185)),
        MockPortfolioRepository::default().with_portfolio("p1", "u1"),
    );

    let holding = service
        .add_holding("p1", new_holding("a1", dec!(10), dec!(150)))
        .await
        .unwrap();
    assert_eq!(holding.quantity, dec!(10));
    assert_eq!(holding.average_buy_price, dec!(150));
}

#[tokio::test]
async fn add_holding_merges_with_weighted_average_cost() {
    let service = service_with(
        MockAssetRepository::default().with_asset("a1", "AAPL", dec!(185)),
        MockPortfolioRepository::default().with_portfolio("p1", "u1"),
    );

    service
        .add_holding("p1", new_holding("a1", dec!(10), dec!(100)))
        .await
        .unwrap();
    let merged = service
        .add_holding("p1", new_holding("a1", dec!(30), dec!(200)))
        .await
        .unwrap();

    // (10*100 + 30*200) / 40 = 175
    assert_eq!(merged.quantity, dec!(40));
    assert_eq!(merged.average_buy_price, dec!(175));

    // Still a single row for the pair.
    let valued = service.valued_holdings_for_portfolio("p1").unwrap();
    assert_eq!(valued.len(), 1);
}

#[tokio::test]
async fn add_holding_rejects_unknown_asset() {
    let service = service_with(
        MockAssetRepository::default(),
        MockPortfolioRepository::default().with_portfolio("p1", "u1"),
    );

    let err = service
        .add_holding("p1", new_holding("ghost", dec!(1), dec!(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
}

#[tokio::test]
async fn add_holding_rejects_non_positive_quantity() {
    let service = service_with(
        MockAssetRepository::default().with_asset("a1", "AAPL", dec!(185)),
        MockPortfolioRepository::default().with_portfolio("p1", "u1"),
    );

    let err = service
        .add_holding("p1", new_holding("a1", dec!(0), dec!(10)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn valuation_computes_pnl_and_percentage() {
    let service = service_with(
        MockAssetRepository::default().with_asset("a1", "AAPL", dec!(185)),
        MockPortfolioRepository::default().with_portfolio("p1", "u1"),
    );
    service
        .add_holding("p1", new_holding("a1", dec!(10), dec!(150)))
        .await
        .unwrap();

    let valued = service.valued_holdings_for_portfolio("p1").unwrap();
    assert_eq!(valued.len(), 1);
    let v = &valued[0];
    assert_eq!(v.current_value, dec!(1850));
    assert_eq!(v.invested_value, dec!(1500));
    assert_eq!(v.pnl, dec!(350));
    // 350 / 1500 * 100
    assert_eq!(v.pnl_percent.round_dp(4), dec!(23.3333));
}

#[tokio::test]
async fn valuation_guards_division_by_zero_invested() {
    let service = service_with(
        MockAssetRepository::default().with_asset("a1", "FREE", dec!(50)),
        MockPortfolioRepository::default().with_portfolio("p1", "u1"),
    );
    service
        .add_holding("p1", new_holding("a1", dec!(4), dec!(0)))
        .await
        .unwrap();

    let valued = service.valued_holdings_for_portfolio("p1").unwrap();
    assert_eq!(valued[0].invested_value, Decimal::ZERO);
    assert_eq!(valued[0].pnl, dec!(200));
    assert_eq!(valued[0].pnl_percent, Decimal::ZERO);
}

#[tokio::test]
async fn delete_holding_enforces_ownership() {
    let service = service_with(
        MockAssetRepository::default().with_asset("a1", "AAPL", dec!(185)),
        MockPortfolioRepository::default()
            .with_portfolio("p1", "u1")
            .with_portfolio("p2", "u2"),
    );
    let holding = service
        .add_holding("p1", new_holding("a1", dec!(1), dec!(1)))
        .await
        .unwrap();

    let err = service.delete_holding("u2", &holding.id).await.unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));

    let deleted = service.delete_holding("u1", &holding.id).await.unwrap();
    assert_eq!(deleted, 1);
}
