//! Background schedulers for the two periodic jobs.
//!
//! Price refresh runs on a fixed interval (15-minute default); the portfolio
//! snapshot runs at local midnight. Failures are logged and the loops keep
//! going.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::time::{interval, sleep};
use tracing::{info, warn};

use crate::config::Config;
use crate::main_lib::AppState;

/// Initial delay before the first refresh (lets the server fully start).
const INITIAL_DELAY_SECS: u64 = 60;

pub fn start_schedulers(state: Arc<AppState>, config: &Config) {
    start_price_refresh_scheduler(state.clone(), config.price_refresh_interval);
    start_daily_snapshot_scheduler(state);
}

fn start_price_refresh_scheduler(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!(
            "Price refresh scheduler started ({}s interval)",
            every.as_secs()
        );
        sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        let mut tick = interval(every);
        loop {
            tick.tick().await;
            match state.price_service.refresh_all_prices().await {
                Ok(summary) => info!(
                    "Scheduled price refresh completed: {} updated, {} skipped, {} failed",
                    summary.updated, summary.skipped, summary.failed
                ),
                Err(e) => warn!("Scheduled price refresh failed: {}", e),
            }
        }
    });
}

fn start_daily_snapshot_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!("Daily snapshot scheduler started (runs at local midnight)");
        loop {
            sleep(duration_until_next_midnight()).await;
            let today = Local::now().date_naive();
            match state.snapshot_service.snapshot_all(today).await {
                Ok(summary) => info!(
                    "Scheduled snapshot completed: {} written, {} failed",
                    summary.snapshots, summary.failed
                ),
                Err(e) => warn!("Scheduled snapshot failed: {}", e),
            }
        }
    });
}

fn duration_until_next_midnight() -> Duration {
    let now = Local::now().naive_local();
    let next_midnight = now
        .date()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_else(|| now + chrono::Duration::days(1));
    (next_midnight - now)
        .to_std()
        .unwrap_or(Duration::from_secs(60))
}
