use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use networth_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};
use networth_core::Result;

use super::model::TransactionDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::transactions;

/// Repository for managing ledger transactions in the database
pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TransactionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for TransactionRepository {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        // Dates are stored as %Y-%m-%d so lexicographic order is date order.
        let results = transactions::table
            .select(TransactionDB::as_select())
            .filter(transactions::user_id.eq(user_id))
            .order((transactions::date.desc(), transactions::created_at.desc()))
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Transaction::from).collect())
    }

    async fn insert(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction> {
        let transaction_db = TransactionDB::from_new(user_id, new_transaction);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Transaction> {
                let result_db = diesel::insert_into(transactions::table)
                    .values(&transaction_db)
                    .get_result::<TransactionDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(result_db.into())
            })
            .await
    }
}
