use async_trait::async_trait;

use crate::errors::Result;
use crate::holdings::NewHolding;
use crate::portfolios::portfolios_model::{
    NewPortfolio, Portfolio, PortfolioDetail, PortfolioSummary,
};

/// Trait for portfolio repository operations.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    fn get_by_id(&self, portfolio_id: &str) -> Result<Portfolio>;
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>>;
    /// Every portfolio in the system; used by the snapshot job.
    fn list_all(&self) -> Result<Vec<Portfolio>>;
    async fn create(&self, user_id: &str, new_portfolio: NewPortfolio) -> Result<Portfolio>;
    /// Cascades to holdings and history rows.
    async fn delete(&self, portfolio_id: &str) -> Result<usize>;
}

/// Trait for portfolio service operations. All methods are scoped to the
/// owning user; a portfolio owned by someone else reads as not found.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    fn list_portfolios(&self, user_id: &str) -> Result<Vec<PortfolioSummary>>;
    fn get_portfolio_detail(&self, user_id: &str, portfolio_id: &str) -> Result<PortfolioDetail>;
    async fn create_portfolio(
        &self,
        user_id: &str,
        new_portfolio: NewPortfolio,
    ) -> Result<Portfolio>;
    async fn delete_portfolio(&self, user_id: &str, portfolio_id: &str) -> Result<usize>;
    /// Adds a holding to an owned portfolio (weighted-average merge on a
    /// repeat buy-in).
    async fn add_holding(
        &self,
        user_id: &str,
        portfolio_id: &str,
        new_holding: NewHolding,
    ) -> Result<crate::holdings::Holding>;
}
