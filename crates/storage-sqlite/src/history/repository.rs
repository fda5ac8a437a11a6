use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use networth_core::snapshots::{PortfolioSnapshot, SnapshotRepositoryTrait};
use networth_core::Result;

use super::model::PortfolioHistoryDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::portfolio_history;
use crate::utils::parse_decimal_tolerant;

/// Repository for the (portfolio, date) history table
pub struct SnapshotRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    fn history_for_portfolio(&self, portfolio_id: &str) -> Result<Vec<PortfolioSnapshot>> {
        let mut conn = get_connection(&self.pool)?;

        let results = portfolio_history::table
            .select(PortfolioHistoryDB::as_select())
            .filter(portfolio_history::portfolio_id.eq(portfolio_id))
            .order(portfolio_history::date.desc())
            .load::<PortfolioHistoryDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(PortfolioSnapshot::from).collect())
    }

    fn sum_total_value_on(
        &self,
        portfolio_ids: &[String],
        date: NaiveDate,
    ) -> Result<Option<Decimal>> {
        if portfolio_ids.is_empty() {
            return Ok(None);
        }
        let mut conn = get_connection(&self.pool)?;

        // Values are stored as TEXT, so the sum happens here rather than in
        // SQL.
        let totals: Vec<String> = portfolio_history::table
            .select(portfolio_history::total_value)
            .filter(portfolio_history::portfolio_id.eq_any(portfolio_ids))
            .filter(portfolio_history::date.eq(date.format("%Y-%m-%d").to_string()))
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;

        if totals.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            totals
                .iter()
                .map(|t| parse_decimal_tolerant(t, "total_value"))
                .sum(),
        ))
    }

    async fn upsert(
        &self,
        portfolio_id: &str,
        date: NaiveDate,
        total_value: Decimal,
        invested_value: Decimal,
    ) -> Result<PortfolioSnapshot> {
        let row = PortfolioHistoryDB {
            id: uuid::Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            total_value: total_value.to_string(),
            invested_value: invested_value.to_string(),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PortfolioSnapshot> {
                // Upsert by the (portfolio, date) natural key; the row id of
                // an existing snapshot is left untouched.
                diesel::insert_into(portfolio_history::table)
                    .values(&row)
                    .on_conflict((
                        portfolio_history::portfolio_id,
                        portfolio_history::date,
                    ))
                    .do_update()
                    .set((
                        portfolio_history::total_value.eq(&row.total_value),
                        portfolio_history::invested_value.eq(&row.invested_value),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let result_db = portfolio_history::table
                    .select(PortfolioHistoryDB::as_select())
                    .filter(portfolio_history::portfolio_id.eq(&row.portfolio_id))
                    .filter(portfolio_history::date.eq(&row.date))
                    .first::<PortfolioHistoryDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into())
            })
            .await
    }
}
