use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use tempfile::TempDir;

use networth_core::assets::{AssetCategory, AssetRepositoryTrait, NewAsset};
use networth_core::errors::{DatabaseError, Error};
use networth_core::holdings::{HoldingRepositoryTrait, HoldingSource, NewHolding};
use networth_core::portfolios::{NewPortfolio, PortfolioRepositoryTrait};
use networth_core::snapshots::SnapshotRepositoryTrait;
use networth_core::transactions::{
    NewTransaction, TransactionKind, TransactionRepositoryTrait, TransactionSource,
};
use networth_core::users::UserRepositoryTrait;
use networth_storage_sqlite::{
    assets::AssetRepository, db, history::SnapshotRepository, holdings::HoldingRepository,
    portfolios::PortfolioRepository, transactions::TransactionRepository, users::UserRepository,
    DbPool, WriteHandle,
};

struct TestDb {
    // Held so the database file outlives the repositories.
    _tmp: TempDir,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TestDb {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let db_path = db::init(tmp.path().join("test.db").to_str().unwrap()).unwrap();
        let pool = db::create_pool(&db_path).unwrap();
        db::run_migrations(&pool).unwrap();
        let writer = db::write_actor::spawn_writer((*pool).clone());
        Self {
            _tmp: tmp,
            pool,
            writer,
        }
    }

    fn assets(&self) -> AssetRepository {
        AssetRepository::new(self.pool.clone(), self.writer.clone())
    }

    fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone(), self.writer.clone())
    }

    fn portfolios(&self) -> PortfolioRepository {
        PortfolioRepository::new(self.pool.clone(), self.writer.clone())
    }

    fn holdings(&self) -> HoldingRepository {
        HoldingRepository::new(self.pool.clone(), self.writer.clone())
    }

    fn history(&self) -> SnapshotRepository {
        SnapshotRepository::new(self.pool.clone(), self.writer.clone())
    }

    fn transactions(&self) -> TransactionRepository {
        TransactionRepository::new(self.pool.clone(), self.writer.clone())
    }
}

fn new_asset(ticker: &str, price: rust_decimal::Decimal) -> NewAsset {
    NewAsset {
        ticker: ticker.to_string(),
        name: format!("{} Inc.", ticker),
        category: AssetCategory::Stocks,
        current_price: price,
    }
}

#[tokio::test]
async fn asset_upsert_is_keyed_by_ticker() {
    let db = TestDb::new();
    let assets = db.assets();

    let first = assets.upsert(new_asset("AAPL", dec!(185))).await.unwrap();
    let second = assets.upsert(new_asset("AAPL", dec!(190))).await.unwrap();

    // Same row, refreshed price.
    assert_eq!(first.id, second.id);
    assert_eq!(second.current_price, dec!(190));
    assert_eq!(assets.list().unwrap().len(), 1);

    let found = assets.get_by_ticker("AAPL").unwrap().unwrap();
    assert_eq!(found.current_price, dec!(190));
    assert!(assets.get_by_ticker("MSFT").unwrap().is_none());
}

#[tokio::test]
async fn update_price_touches_price_and_timestamp() {
    let db = TestDb::new();
    let assets = db.assets();
    assets.upsert(new_asset("BTC-USD", dec!(65000))).await.unwrap();

    let as_of = Utc::now().naive_utc();
    assets
        .update_price("BTC-USD", dec!(70000), as_of)
        .await
        .unwrap();

    let asset = assets.get_by_ticker("BTC-USD").unwrap().unwrap();
    assert_eq!(asset.current_price, dec!(70000));
}

#[tokio::test]
async fn missing_asset_reads_as_not_found() {
    let db = TestDb::new();
    let err = db.assets().get_by_id("nope").unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
}

#[tokio::test]
async fn deleting_a_portfolio_cascades() {
    let db = TestDb::new();
    let users = db.users();
    let portfolios = db.portfolios();
    let holdings = db.holdings();
    let history = db.history();

    let user = users.ensure_default("demo").await.unwrap();
    let asset = db.assets().upsert(new_asset("AAPL", dec!(185))).await.unwrap();
    let portfolio = portfolios
        .create(
            &user.id,
            NewPortfolio {
                name: "Long Term".to_string(),
                currency: Some("EUR".to_string()),
            },
        )
        .await
        .unwrap();

    holdings
        .insert(
            &portfolio.id,
            NewHolding {
                asset_id: asset.id.clone(),
                quantity: dec!(10),
                average_buy_price: dec!(150),
                source: HoldingSource::Manual,
            },
        )
        .await
        .unwrap();
    history
        .upsert(
            &portfolio.id,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            dec!(1850),
            dec!(1500),
        )
        .await
        .unwrap();

    assert_eq!(portfolios.delete(&portfolio.id).await.unwrap(), 1);
    assert!(holdings.list_by_portfolio(&portfolio.id).unwrap().is_empty());
    assert!(history.history_for_portfolio(&portfolio.id).unwrap().is_empty());
}

#[tokio::test]
async fn history_upserts_by_portfolio_and_date() {
    let db = TestDb::new();
    let user = db.users().ensure_default("demo").await.unwrap();
    let portfolio = db
        .portfolios()
        .create(
            &user.id,
            NewPortfolio {
                name: "Main".to_string(),
                currency: None,
            },
        )
        .await
        .unwrap();
    let history = db.history();

    let day_one = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    history.upsert(&portfolio.id, day_one, dec!(100), dec!(90)).await.unwrap();
    history.upsert(&portfolio.id, day_one, dec!(120), dec!(90)).await.unwrap();
    let day_two = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    history.upsert(&portfolio.id, day_two, dec!(130), dec!(90)).await.unwrap();

    let rows = history.history_for_portfolio(&portfolio.id).unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first, and the re-run overwrote the first day's value.
    assert_eq!(rows[0].date, day_two);
    assert_eq!(rows[0].total_value, dec!(130));
    assert_eq!(rows[1].total_value, dec!(120));

    let sum = history
        .sum_total_value_on(&[portfolio.id.clone()], day_one)
        .unwrap();
    assert_eq!(sum, Some(dec!(120)));
    let missing = history
        .sum_total_value_on(&[portfolio.id.clone()], NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
        .unwrap();
    assert_eq!(missing, None);
}

#[tokio::test]
async fn transactions_are_listed_newest_first() {
    let db = TestDb::new();
    let user = db.users().ensure_default("demo").await.unwrap();
    let transactions = db.transactions();

    for (amount, date) in [
        (dec!(10), NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()),
        (dec!(20), NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()),
        (dec!(30), NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()),
    ] {
        transactions
            .insert(
                &user.id,
                NewTransaction {
                    amount,
                    kind: TransactionKind::Expense,
                    category: "Groceries".to_string(),
                    description: None,
                    date: Some(date),
                    source: TransactionSource::Manual,
                },
            )
            .await
            .unwrap();
    }

    let listed = transactions.list_by_user(&user.id).unwrap();
    let amounts: Vec<_> = listed.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![dec!(20), dec!(30), dec!(10)]);
}

#[tokio::test]
async fn ensure_default_is_idempotent() {
    let db = TestDb::new();
    let users = db.users();

    let first = users.ensure_default("demo").await.unwrap();
    let second = users.ensure_default("someone-else").await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.username, "demo");
    assert_eq!(users.first_user().unwrap().unwrap().id, first.id);
}
