//! Database model for assets.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use networth_core::assets::{Asset, AssetCategory, NewAsset};

use crate::utils::parse_decimal_tolerant;

/// Database model for assets
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetDB {
    pub id: String,
    pub ticker: String,
    pub name: String,
    pub category: String,
    pub current_price: String,
    pub last_updated: NaiveDateTime,
}

impl From<AssetDB> for Asset {
    fn from(db: AssetDB) -> Self {
        Self {
            id: db.id,
            ticker: db.ticker,
            name: db.name,
            // Unknown strings read as stocks rather than failing the row.
            category: AssetCategory::from_db_str(&db.category).unwrap_or(AssetCategory::Stocks),
            current_price: parse_decimal_tolerant(&db.current_price, "current_price"),
            last_updated: db.last_updated,
        }
    }
}

impl From<NewAsset> for AssetDB {
    fn from(domain: NewAsset) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ticker: domain.ticker,
            name: domain.name,
            category: domain.category.as_db_str().to_string(),
            current_price: domain.current_price.to_string(),
            last_updated: chrono::Utc::now().naive_utc(),
        }
    }
}
