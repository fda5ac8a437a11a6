use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use networth_core::{
    assets::{AssetService, AssetServiceTrait},
    constants::DEFAULT_USERNAME,
    dashboard::{DashboardService, DashboardServiceTrait},
    holdings::{HoldingsService, HoldingsServiceTrait},
    insights::{InsightsService, InsightsServiceTrait},
    portfolios::{PortfolioService, PortfolioServiceTrait},
    quotes::{PriceService, PriceServiceTrait},
    snapshots::{SnapshotService, SnapshotServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::UserRepositoryTrait,
};
use networth_market_data::MarketDataClient;
use networth_storage_sqlite::{
    assets::AssetRepository, db, history::SnapshotRepository, holdings::HoldingRepository,
    portfolios::PortfolioRepository, transactions::TransactionRepository, users::UserRepository,
};

use crate::auth::AuthManager;
use crate::config::Config;

pub struct AppState {
    pub asset_service: Arc<dyn AssetServiceTrait + Send + Sync>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait + Send + Sync>,
    pub holdings_service: Arc<dyn HoldingsServiceTrait + Send + Sync>,
    pub snapshot_service: Arc<dyn SnapshotServiceTrait + Send + Sync>,
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait + Send + Sync>,
    pub insights_service: Arc<dyn InsightsServiceTrait + Send + Sync>,
    pub price_service: Arc<dyn PriceServiceTrait + Send + Sync>,
    pub user_repository: Arc<dyn UserRepositoryTrait + Send + Sync>,
    /// The single-tenant user every request is scoped to.
    pub default_user_id: String,
    pub webhook_secret: Option<String>,
    pub auth: Option<Arc<AuthManager>>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("NW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::write_actor::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let asset_repository = Arc::new(AssetRepository::new(pool.clone(), writer.clone()));
    let portfolio_repository = Arc::new(PortfolioRepository::new(pool.clone(), writer.clone()));
    let holding_repository = Arc::new(HoldingRepository::new(pool.clone(), writer.clone()));
    let snapshot_repository = Arc::new(SnapshotRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));

    let market_data = Arc::new(MarketDataClient::new().await?);

    let asset_service = Arc::new(AssetService::new(
        asset_repository.clone(),
        market_data.clone(),
    ));
    let holdings_service = Arc::new(HoldingsService::new(
        holding_repository.clone(),
        asset_repository.clone(),
        portfolio_repository.clone(),
    ));
    let portfolio_service = Arc::new(PortfolioService::new(
        portfolio_repository.clone(),
        holdings_service.clone(),
    ));
    let snapshot_service = Arc::new(SnapshotService::new(
        portfolio_repository.clone(),
        holdings_service.clone(),
        snapshot_repository.clone(),
    ));
    let transaction_service = Arc::new(TransactionService::new(transaction_repository.clone()));
    let dashboard_service = Arc::new(DashboardService::new(
        portfolio_repository.clone(),
        holdings_service.clone(),
        snapshot_repository.clone(),
    ));
    let insights_service = Arc::new(InsightsService::new(
        portfolio_repository.clone(),
        holdings_service.clone(),
    ));
    let price_service = Arc::new(PriceService::new(
        asset_repository.clone(),
        market_data.clone(),
    ));

    // Single-tenant mode: every request is scoped to the first user.
    let default_user = user_repository.ensure_default(DEFAULT_USERNAME).await?;
    tracing::info!("Serving data for user '{}'", default_user.username);

    if config.webhook_secret.is_none() {
        tracing::warn!("NW_WEBHOOK_SECRET is not set; the transaction webhook will reject all requests");
    }

    let auth = config
        .auth
        .as_ref()
        .map(AuthManager::new)
        .transpose()?
        .map(Arc::new);

    Ok(Arc::new(AppState {
        asset_service,
        portfolio_service,
        holdings_service,
        snapshot_service,
        transaction_service,
        dashboard_service,
        insights_service,
        price_service,
        user_repository,
        default_user_id: default_user.id,
        webhook_secret: config.webhook_secret.clone(),
        auth,
        db_path,
    }))
}
