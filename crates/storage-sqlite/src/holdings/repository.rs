use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use networth_core::holdings::{Holding, HoldingRepositoryTrait, NewHolding};
use networth_core::Result;

use super::model::HoldingDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::holdings;

/// Repository for managing holding rows in the database
pub struct HoldingRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl HoldingRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl HoldingRepositoryTrait for HoldingRepository {
    fn get_by_id(&self, holding_id: &str) -> Result<Holding> {
        let mut conn = get_connection(&self.pool)?;

        let result = holdings::table
            .select(HoldingDB::as_select())
            .find(holding_id)
            .first::<HoldingDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(result.into())
    }

    fn list_by_portfolio(&self, portfolio_id: &str) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;

        let results = holdings::table
            .select(HoldingDB::as_select())
            .filter(holdings::portfolio_id.eq(portfolio_id))
            .load::<HoldingDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Holding::from).collect())
    }

    fn list_by_portfolios(&self, portfolio_ids: &[String]) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;

        let results = holdings::table
            .select(HoldingDB::as_select())
            .filter(holdings::portfolio_id.eq_any(portfolio_ids))
            .load::<HoldingDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Holding::from).collect())
    }

    fn find_by_portfolio_and_asset(
        &self,
        portfolio_id: &str,
        asset_id: &str,
    ) -> Result<Option<Holding>> {
        let mut conn = get_connection(&self.pool)?;

        let result = holdings::table
            .select(HoldingDB::as_select())
            .filter(holdings::portfolio_id.eq(portfolio_id))
            .filter(holdings::asset_id.eq(asset_id))
            .first::<HoldingDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(result.map(Holding::from))
    }

    async fn insert(&self, portfolio_id: &str, new_holding: NewHolding) -> Result<Holding> {
        let holding_db = HoldingDB::from_new(portfolio_id, new_holding);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Holding> {
                let result_db = diesel::insert_into(holdings::table)
                    .values(&holding_db)
                    .get_result::<HoldingDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into())
            })
            .await
    }

    async fn update_position(
        &self,
        holding_id: &str,
        quantity: Decimal,
        average_buy_price: Decimal,
    ) -> Result<Holding> {
        let holding_id = holding_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Holding> {
                let result_db = diesel::update(holdings::table.find(&holding_id))
                    .set((
                        holdings::quantity.eq(quantity.to_string()),
                        holdings::average_buy_price.eq(average_buy_price.to_string()),
                    ))
                    .get_result::<HoldingDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into())
            })
            .await
    }

    async fn delete(&self, holding_id: &str) -> Result<usize> {
        let holding_id = holding_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted =
                    diesel::delete(holdings::table.filter(holdings::id.eq(&holding_id)))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                Ok(deleted)
            })
            .await
    }
}
