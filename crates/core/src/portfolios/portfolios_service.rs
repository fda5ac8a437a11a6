use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::constants::DEFAULT_CURRENCY;
use crate::errors::{DatabaseError, Error, Result};
use crate::holdings::{Holding, HoldingsServiceTrait, NewHolding};
use crate::portfolios::portfolios_model::{
    NewPortfolio, Portfolio, PortfolioDetail, PortfolioSummary,
};
use crate::portfolios::portfolios_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};

/// Service for portfolio CRUD and per-portfolio totals.
pub struct PortfolioService {
    portfolios: Arc<dyn PortfolioRepositoryTrait>,
    holdings: Arc<dyn HoldingsServiceTrait>,
}

impl PortfolioService {
    pub fn new(
        portfolios: Arc<dyn PortfolioRepositoryTrait>,
        holdings: Arc<dyn HoldingsServiceTrait>,
    ) -> Self {
        Self {
            portfolios,
            holdings,
        }
    }

    /// Loads a portfolio and verifies ownership. Someone else's portfolio is
    /// indistinguishable from a missing one.
    fn owned_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<Portfolio> {
        let portfolio = self.portfolios.get_by_id(portfolio_id)?;
        if portfolio.user_id != user_id {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Portfolio {} not found",
                portfolio_id
            ))));
        }
        Ok(portfolio)
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    fn list_portfolios(&self, user_id: &str) -> Result<Vec<PortfolioSummary>> {
        let portfolios = self.portfolios.list_by_user(user_id)?;
        let mut summaries = Vec::with_capacity(portfolios.len());
        for portfolio in portfolios {
            let total_value: Decimal = self
                .holdings
                .valued_holdings_for_portfolio(&portfolio.id)?
                .iter()
                .map(|h| h.current_value)
                .sum();
            summaries.push(PortfolioSummary {
                id: portfolio.id,
                name: portfolio.name,
                currency: portfolio.currency,
                total_value,
            });
        }
        Ok(summaries)
    }

    fn get_portfolio_detail(&self, user_id: &str, portfolio_id: &str) -> Result<PortfolioDetail> {
        let portfolio = self.owned_portfolio(user_id, portfolio_id)?;
        let holdings = self.holdings.valued_holdings_for_portfolio(&portfolio.id)?;

        let total_value: Decimal = holdings.iter().map(|h| h.current_value).sum();
        let invested_value: Decimal = holdings.iter().map(|h| h.invested_value).sum();
        let pnl = total_value - invested_value;
        let pnl_percent = if invested_value > Decimal::ZERO {
            pnl / invested_value * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        Ok(PortfolioDetail {
            id: portfolio.id,
            name: portfolio.name,
            currency: portfolio.currency,
            total_value,
            invested_value,
            pnl,
            pnl_percent,
            holdings,
        })
    }

    async fn create_portfolio(
        &self,
        user_id: &str,
        mut new_portfolio: NewPortfolio,
    ) -> Result<Portfolio> {
        new_portfolio.validate()?;
        if new_portfolio.currency.is_none() {
            new_portfolio.currency = Some(DEFAULT_CURRENCY.to_string());
        }
        self.portfolios.create(user_id, new_portfolio).await
    }

    async fn delete_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<usize> {
        self.owned_portfolio(user_id, portfolio_id)?;
        self.portfolios.delete(portfolio_id).await
    }

    async fn add_holding(
        &self,
        user_id: &str,
        portfolio_id: &str,
        new_holding: NewHolding,
    ) -> Result<Holding> {
        self.owned_portfolio(user_id, portfolio_id)?;
        self.holdings.add_holding(portfolio_id, new_holding).await
    }
}
