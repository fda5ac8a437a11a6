//! Backfills 30 days of synthetic history for every portfolio, so charts
//! have something to show before the daily snapshot job has run for a while.
//!
//! Usage: `cargo run --bin populate_history` (honors NW_DB_PATH).

use std::sync::Arc;

use chrono::Local;

use networth_core::holdings::HoldingsService;
use networth_core::portfolios::PortfolioRepositoryTrait;
use networth_core::snapshots::{SnapshotService, SnapshotServiceTrait};
use networth_server::config::Config;
use networth_server::init_tracing;
use networth_storage_sqlite::{
    assets::AssetRepository, db, history::SnapshotRepository, holdings::HoldingRepository,
    portfolios::PortfolioRepository,
};

const HISTORY_DAYS: u32 = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();

    let db_path = db::init(&config.db_path)?;
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::write_actor::spawn_writer((*pool).clone());

    let portfolio_repository = Arc::new(PortfolioRepository::new(pool.clone(), writer.clone()));
    let holding_repository = Arc::new(HoldingRepository::new(pool.clone(), writer.clone()));
    let asset_repository = Arc::new(AssetRepository::new(pool.clone(), writer.clone()));
    let snapshot_repository = Arc::new(SnapshotRepository::new(pool.clone(), writer.clone()));

    if portfolio_repository.list_all()?.is_empty() {
        println!("No portfolios found. Create a portfolio first.");
        return Ok(());
    }

    let holdings_service = Arc::new(HoldingsService::new(
        holding_repository,
        asset_repository,
        portfolio_repository.clone(),
    ));
    let snapshot_service = SnapshotService::new(
        portfolio_repository,
        holdings_service,
        snapshot_repository,
    );

    let today = Local::now().date_naive();
    let written = snapshot_service
        .backfill_history(today, HISTORY_DAYS)
        .await?;

    println!(
        "Successfully populated history for all portfolios ({} rows).",
        written
    );
    Ok(())
}
