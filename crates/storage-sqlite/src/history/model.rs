//! Database model for portfolio history snapshots.

use chrono::NaiveDate;
use diesel::prelude::*;
use log::warn;

use networth_core::snapshots::PortfolioSnapshot;

use crate::utils::parse_decimal_tolerant;

/// Database model for portfolio history rows
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolio_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioHistoryDB {
    pub id: String,
    pub portfolio_id: String,
    pub date: String,
    pub total_value: String,
    pub invested_value: String,
}

impl From<PortfolioHistoryDB> for PortfolioSnapshot {
    fn from(db: PortfolioHistoryDB) -> Self {
        let date = NaiveDate::parse_from_str(&db.date, "%Y-%m-%d").unwrap_or_else(|e| {
            warn!("Invalid history date '{}': {}", db.date, e);
            NaiveDate::default()
        });
        Self {
            id: db.id,
            portfolio_id: db.portfolio_id,
            date,
            total_value: parse_decimal_tolerant(&db.total_value, "total_value"),
            invested_value: parse_decimal_tolerant(&db.invested_value, "invested_value"),
        }
    }
}
