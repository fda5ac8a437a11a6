use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use networth_core::constants::DEFAULT_CURRENCY;
use networth_core::portfolios::{NewPortfolio, Portfolio, PortfolioRepositoryTrait};
use networth_core::Result;

use super::model::PortfolioDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::portfolios;

/// Repository for managing portfolio rows in the database
pub struct PortfolioRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PortfolioRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    fn get_by_id(&self, portfolio_id: &str) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;

        let result = portfolios::table
            .select(PortfolioDB::as_select())
            .find(portfolio_id)
            .first::<PortfolioDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(result.into())
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;

        let results = portfolios::table
            .select(PortfolioDB::as_select())
            .filter(portfolios::user_id.eq(user_id))
            .order(portfolios::name.asc())
            .load::<PortfolioDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Portfolio::from).collect())
    }

    fn list_all(&self) -> Result<Vec<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;

        let results = portfolios::table
            .select(PortfolioDB::as_select())
            .load::<PortfolioDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Portfolio::from).collect())
    }

    async fn create(&self, user_id: &str, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        let portfolio_db = PortfolioDB {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_portfolio.name,
            currency: new_portfolio
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Portfolio> {
                let result_db = diesel::insert_into(portfolios::table)
                    .values(&portfolio_db)
                    .get_result::<PortfolioDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into())
            })
            .await
    }

    async fn delete(&self, portfolio_id: &str) -> Result<usize> {
        let portfolio_id = portfolio_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Holdings and history rows go with it via FK cascade.
                let deleted = diesel::delete(
                    portfolios::table.filter(portfolios::id.eq(&portfolio_id)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(deleted)
            })
            .await
    }
}
