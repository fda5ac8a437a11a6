//! Holding domain models and valuation arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::assets::{Asset, AssetCategory};
use crate::errors::{Result, ValidationError};

/// How a holding entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HoldingSource {
    #[default]
    Manual,
    Api,
}

impl HoldingSource {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            HoldingSource::Manual => "MANUAL",
            HoldingSource::Api => "API",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "MANUAL" => Some(HoldingSource::Manual),
            "API" => Some(HoldingSource::Api),
            _ => None,
        }
    }
}

/// A position in one asset within one portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    pub portfolio_id: String,
    pub asset_id: String,
    pub quantity: Decimal,
    pub average_buy_price: Decimal,
    pub source: HoldingSource,
}

/// Payload for adding a position to a portfolio.
///
/// When the portfolio already holds the asset, the service merges the two
/// positions with a weighted-average cost instead of inserting a second row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    pub asset_id: String,
    pub quantity: Decimal,
    pub average_buy_price: Decimal,
    #[serde(default)]
    pub source: HoldingSource,
}

impl NewHolding {
    pub fn validate(&self) -> Result<()> {
        if self.asset_id.trim().is_empty() {
            return Err(ValidationError::MissingField("assetId".to_string()).into());
        }
        if self.quantity <= Decimal::ZERO {
            return Err(
                ValidationError::InvalidInput("quantity must be positive".to_string()).into(),
            );
        }
        if self.average_buy_price < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "average buy price cannot be negative".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// A holding joined with its asset and valued at the current price.
///
/// All fields are recomputed from scratch on every read; nothing here is
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedHolding {
    pub id: String,
    pub portfolio_id: String,
    pub asset_id: String,
    pub ticker: String,
    pub name: String,
    pub category: AssetCategory,
    pub quantity: Decimal,
    pub average_buy_price: Decimal,
    pub source: HoldingSource,
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub invested_value: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
}

impl ValuedHolding {
    /// Values a holding against its asset's current price.
    pub fn compute(holding: &Holding, asset: &Asset) -> Self {
        let current_value = holding.quantity * asset.current_price;
        let invested_value = holding.quantity * holding.average_buy_price;
        let pnl = current_value - invested_value;
        let pnl_percent = if invested_value > Decimal::ZERO {
            pnl / invested_value * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
        Self {
            id: holding.id.clone(),
            portfolio_id: holding.portfolio_id.clone(),
            asset_id: asset.id.clone(),
            ticker: asset.ticker.clone(),
            name: asset.name.clone(),
            category: asset.category,
            quantity: holding.quantity,
            average_buy_price: holding.average_buy_price,
            source: holding.source,
            current_price: asset.current_price,
            current_value,
            invested_value,
            pnl,
            pnl_percent,
        }
    }
}
