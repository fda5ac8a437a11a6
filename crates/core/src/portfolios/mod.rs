//! Portfolios module - containers of holdings, scoped to a user.

mod portfolios_model;
mod portfolios_service;
mod portfolios_traits;

// Re-export the public interface
pub use portfolios_model::{NewPortfolio, Portfolio, PortfolioDetail, PortfolioSummary};
pub use portfolios_service::PortfolioService;
pub use portfolios_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
