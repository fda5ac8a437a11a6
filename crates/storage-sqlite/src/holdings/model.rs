//! Database model for holdings.

use diesel::prelude::*;

use networth_core::holdings::{Holding, HoldingSource, NewHolding};

use crate::utils::parse_decimal_tolerant;

/// Database model for holdings
#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingDB {
    pub id: String,
    pub portfolio_id: String,
    pub asset_id: String,
    pub quantity: String,
    pub average_buy_price: String,
    pub source: String,
}

impl From<HoldingDB> for Holding {
    fn from(db: HoldingDB) -> Self {
        Self {
            id: db.id,
            portfolio_id: db.portfolio_id,
            asset_id: db.asset_id,
            quantity: parse_decimal_tolerant(&db.quantity, "quantity"),
            average_buy_price: parse_decimal_tolerant(
                &db.average_buy_price,
                "average_buy_price",
            ),
            source: HoldingSource::from_db_str(&db.source).unwrap_or_default(),
        }
    }
}

impl HoldingDB {
    pub fn from_new(portfolio_id: &str, domain: NewHolding) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            asset_id: domain.asset_id,
            quantity: domain.quantity.to_string(),
            average_buy_price: domain.average_buy_price.to_string(),
            source: domain.source.as_db_str().to_string(),
        }
    }
}
