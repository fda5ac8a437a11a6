use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use log::{error, info};
use rand::Rng;
use rust_decimal::Decimal;

use crate::errors::{DatabaseError, Error, Result};
use crate::holdings::HoldingsServiceTrait;
use crate::portfolios::PortfolioRepositoryTrait;
use crate::snapshots::snapshots_model::{PortfolioSnapshot, SnapshotRunSummary};
use crate::snapshots::snapshots_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};

/// Service producing (portfolio, date) value snapshots.
pub struct SnapshotService {
    portfolios: Arc<dyn PortfolioRepositoryTrait>,
    holdings: Arc<dyn HoldingsServiceTrait>,
    snapshots: Arc<dyn SnapshotRepositoryTrait>,
}

impl SnapshotService {
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

    /// Current (total, invested) of a portfolio at today's prices.
    fn current_totals(&self, portfolio_id: &str) -> Result<(Decimal, Decimal)> {
        let holdings = self.holdings.valued_holdings_for_portfolio(portfolio_id)?;
        let total = holdings.iter().map(|h| h.current_value).sum();
        let invested = holdings.iter().map(|h| h.invested_value).sum();
        Ok((total, invested))
    }
}

#[async_trait]
impl SnapshotServiceTrait for SnapshotService {
    async fn snapshot_all(&self, date: NaiveDate) -> Result<SnapshotRunSummary> {
        let portfolios = self.portfolios.list_all()?;
        info!("Taking portfolio snapshots for {}", date);

        let mut summary = SnapshotRunSummary {
            snapshots: 0,
            failed: 0,
        };
        for portfolio in portfolios {
            // Asset prices are assumed fresh enough from the refresh job.
            let result = match self.current_totals(&portfolio.id) {
                Ok((total, invested)) => self
                    .snapshots
                    .upsert(&portfolio.id, date, total, invested)
                    .await
                    .map(|_| ()),
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => summary.snapshots += 1,
                Err(e) => {
                    error!("Error snapshotting portfolio {}: {}", portfolio.name, e);
                    summary.failed += 1;
                }
            }
        }
        info!(
            "Portfolio snapshots completed: {} written, {} failed",
            summary.snapshots, summary.failed
        );
        Ok(summary)
    }

    fn portfolio_history(
        &self,
        user_id: &str,
        portfolio_id: &str,
    ) -> Result<Vec<PortfolioSnapshot>> {
        let portfolio = self.portfolios.get_by_id(portfolio_id)?;
        if portfolio.user_id != user_id {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Portfolio {} not found",
                portfolio_id
            ))));
        }
        self.snapshots.history_for_portfolio(portfolio_id)
    }

    async fn backfill_history(&self, today: NaiveDate, days: u32) -> Result<usize> {
        let portfolios = self.portfolios.list_all()?;
        let mut written = 0;

        for portfolio in portfolios {
            info!("Generating history for {}", portfolio.name);
            let (current_total, current_invested) = self.current_totals(&portfolio.id)?;

            for i in (1..=i64::from(days)).rev() {
                let date = today - Duration::days(i);
                // Walk back from today's value: roughly 0.5% growth per day
                // plus +/-2% of daily noise. Invested value is held constant.
                let trend_factor = 1.0 - (i as f64) * 0.005;
                let noise = rand::thread_rng().gen_range(0.98..1.02_f64);
                let factor =
                    Decimal::from_f64_retain(trend_factor * noise).unwrap_or(Decimal::ONE);
                let daily_value = current_total * factor;

                self.snapshots
                    .upsert(&portfolio.id, date, daily_value, current_invested)
                    .await?;
                written += 1;
            }
        }
        Ok(written)
    }
}
