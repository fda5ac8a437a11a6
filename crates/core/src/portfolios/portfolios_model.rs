//! Portfolio domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::holdings::ValuedHolding;

/// A named container of holdings, owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub currency: String,
}

/// Payload for creating a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    pub name: String,
    /// Defaults to [`crate::constants::DEFAULT_CURRENCY`] when omitted.
    pub currency: Option<String>,
}

impl NewPortfolio {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.name.len() > 100 {
            return Err(
                ValidationError::InvalidInput("name exceeds 100 characters".to_string()).into(),
            );
        }
        if let Some(currency) = &self.currency {
            if currency.len() != 3 {
                return Err(ValidationError::InvalidInput(format!(
                    "currency '{}' is not a 3-letter code",
                    currency
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Portfolio list row with its current total value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub total_value: Decimal,
}

/// Full portfolio view: totals plus every valued position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDetail {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub total_value: Decimal,
    pub invested_value: Decimal,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
    pub holdings: Vec<ValuedHolding>,
}
