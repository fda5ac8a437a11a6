//! Database model for ledger transactions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use log::warn;

use networth_core::transactions::{
    NewTransaction, Transaction, TransactionKind, TransactionSource,
};

use crate::utils::parse_decimal_tolerant;

/// Database model for transactions
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub date: String,
    pub source: String,
    pub created_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        let date = NaiveDate::parse_from_str(&db.date, "%Y-%m-%d").unwrap_or_else(|e| {
            warn!("Invalid transaction date '{}': {}", db.date, e);
            NaiveDate::default()
        });
        Self {
            id: db.id,
            user_id: db.user_id,
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            kind: TransactionKind::from_db_str(&db.kind).unwrap_or_default(),
            category: db.category,
            description: db.description,
            date,
            source: TransactionSource::from_db_str(&db.source).unwrap_or_default(),
            created_at: db.created_at,
        }
    }
}

impl TransactionDB {
    pub fn from_new(user_id: &str, domain: NewTransaction) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            amount: domain.amount.to_string(),
            kind: domain.kind.as_db_str().to_string(),
            category: domain.category,
            description: domain.description.unwrap_or_default(),
            date: domain
                .date
                .unwrap_or_else(|| now.date())
                .format("%Y-%m-%d")
                .to_string(),
            source: domain.source.as_db_str().to_string(),
            created_at: now,
        }
    }
}
