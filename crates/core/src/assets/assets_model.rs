//! Asset domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Asset categories, in dashboard display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCategory {
    Stocks,
    Crypto,
    Fiat,
    RealEstate,
}

impl AssetCategory {
    /// All categories, in the order the dashboard groups them.
    pub const ALL: [AssetCategory; 4] = [
        AssetCategory::Stocks,
        AssetCategory::Crypto,
        AssetCategory::Fiat,
        AssetCategory::RealEstate,
    ];

    /// Returns the database string representation.
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            AssetCategory::Stocks => "STOCKS",
            AssetCategory::Crypto => "CRYPTO",
            AssetCategory::Fiat => "FIAT",
            AssetCategory::RealEstate => "REAL_ESTATE",
        }
    }

    /// Parses a category from its database string.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "STOCKS" => Some(AssetCategory::Stocks),
            "CRYPTO" => Some(AssetCategory::Crypto),
            "FIAT" => Some(AssetCategory::Fiat),
            "REAL_ESTATE" => Some(AssetCategory::RealEstate),
            _ => None,
        }
    }

    /// Human-readable label used by chart series.
    pub const fn display_label(&self) -> &'static str {
        match self {
            AssetCategory::Stocks => "Stocks",
            AssetCategory::Crypto => "Crypto",
            AssetCategory::Fiat => "Fiat",
            AssetCategory::RealEstate => "Real Estate",
        }
    }

    /// Maps a Yahoo Finance quote type to a category.
    ///
    /// ETFs and mutual funds are treated as stocks. Quote types outside the
    /// supported set are dropped from search results.
    pub fn from_quote_type(quote_type: &str) -> Option<Self> {
        match quote_type {
            "EQUITY" | "ETF" | "MUTUALFUND" => Some(AssetCategory::Stocks),
            "CRYPTOCURRENCY" => Some(AssetCategory::Crypto),
            _ => None,
        }
    }
}

/// Domain model representing a priced asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    /// Exchange ticker, e.g. `AAPL` or `BTC-USD`. Unique.
    pub ticker: String,
    pub name: String,
    pub category: AssetCategory,
    pub current_price: Decimal,
    pub last_updated: NaiveDateTime,
}

/// Payload for creating or refreshing an asset. Upserted by ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub ticker: String,
    pub name: String,
    pub category: AssetCategory,
    pub current_price: Decimal,
}

impl NewAsset {
    pub fn validate(&self) -> Result<()> {
        let ticker = self.ticker.trim();
        if ticker.is_empty() {
            return Err(ValidationError::MissingField("ticker".to_string()).into());
        }
        if ticker.len() > 20 {
            return Err(ValidationError::InvalidInput(format!(
                "ticker '{}' exceeds 20 characters",
                ticker
            ))
            .into());
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        Ok(())
    }
}

/// One row of an online asset search, annotated with whether the ticker is
/// already present locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSearchHit {
    pub ticker: String,
    pub name: String,
    pub category: AssetCategory,
    pub exists: bool,
}
