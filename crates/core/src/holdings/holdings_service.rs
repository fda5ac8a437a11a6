use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::assets::{Asset, AssetRepositoryTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::holdings::holdings_model::{Holding, NewHolding, ValuedHolding};
use crate::holdings::holdings_traits::{HoldingRepositoryTrait, HoldingsServiceTrait};
use crate::portfolios::PortfolioRepositoryTrait;

/// Service for holding mutations and valuation.
pub struct HoldingsService {
    holdings: Arc<dyn HoldingRepositoryTrait>,
    assets: Arc<dyn AssetRepositoryTrait>,
    portfolios: Arc<dyn PortfolioRepositoryTrait>,
}

impl HoldingsService {
    pub fn new(
        holdings: Arc<dyn HoldingRepositoryTrait>,
        assets: Arc<dyn AssetRepositoryTrait>,
        portfolios: Arc<dyn PortfolioRepositoryTrait>,
    ) -> Self {
        Self {
            holdings,
            assets,
            portfolios,
        }
    }

    /// Joins holdings with their assets and values each position.
    fn value_holdings(&self, holdings: Vec<Holding>) -> Result<Vec<ValuedHolding>> {
        if holdings.is_empty() {
            return Ok(Vec::new());
        }

        let mut asset_ids: Vec<String> = holdings.iter().map(|h| h.asset_id.clone()).collect();
        asset_ids.sort();
        asset_ids.dedup();

        let assets: HashMap<String, Asset> = self
            .assets
            .list_by_ids(&asset_ids)?
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect();

        let mut valued = Vec::with_capacity(holdings.len());
        for holding in &holdings {
            match assets.get(&holding.asset_id) {
                Some(asset) => valued.push(ValuedHolding::compute(holding, asset)),
                // A cascade delete can race a read; skip rather than fail the page.
                None => debug!("Holding {} references missing asset", holding.id),
            }
        }
        Ok(valued)
    }
}

#[async_trait]
impl HoldingsServiceTrait for HoldingsService {
    async fn add_holding(&self, portfolio_id: &str, new_holding: NewHolding) -> Result<Holding> {
        new_holding.validate()?;
        // The asset must exist; surfaces a NotFound for dangling ids.
        self.assets.get_by_id(&new_holding.asset_id)?;

        match self
            .holdings
            .find_by_portfolio_and_asset(portfolio_id, &new_holding.asset_id)?
        {
            Some(existing) => {
                // Weighted-average cost on a repeat buy-in.
                let total_quantity = existing.quantity + new_holding.quantity;
                let average_buy_price = if total_quantity > Decimal::ZERO {
                    (existing.quantity * existing.average_buy_price
                        + new_holding.quantity * new_holding.average_buy_price)
                        / total_quantity
                } else {
                    Decimal::ZERO
                };
                self.holdings
                    .update_position(&existing.id, total_quantity, average_buy_price)
                    .await
            }
            None => self.holdings.insert(portfolio_id, new_holding).await,
        }
    }

    async fn delete_holding(&self, user_id: &str, holding_id: &str) -> Result<usize> {
        let holding = self.holdings.get_by_id(holding_id)?;
        let portfolio = self.portfolios.get_by_id(&holding.portfolio_id)?;
        if portfolio.user_id != user_id {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Holding {} not found",
                holding_id
            ))));
        }
        self.holdings.delete(holding_id).await
    }

    fn valued_holdings_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<ValuedHolding>> {
        let holdings = self.holdings.list_by_portfolio(portfolio_id)?;
        self.value_holdings(holdings)
    }

    fn valued_holdings_for_portfolios(
        &self,
        portfolio_ids: &[String],
    ) -> Result<Vec<ValuedHolding>> {
        if portfolio_ids.is_empty() {
            return Ok(Vec::new());
        }
        let holdings = self.holdings.list_by_portfolios(portfolio_ids)?;
        self.value_holdings(holdings)
    }
}
