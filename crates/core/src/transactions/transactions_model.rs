//! Ledger transaction models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "INCOME",
            TransactionKind::Expense => "EXPENSE",
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "INCOME" => Some(TransactionKind::Income),
            "EXPENSE" => Some(TransactionKind::Expense),
            "DEPOSIT" => Some(TransactionKind::Deposit),
            "WITHDRAWAL" => Some(TransactionKind::Withdrawal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionSource {
    #[default]
    Manual,
    Webhook,
}

impl TransactionSource {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            TransactionSource::Manual => "MANUAL",
            TransactionSource::Webhook => "WEBHOOK",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "MANUAL" => Some(TransactionSource::Manual),
            "WEBHOOK" => Some(TransactionSource::Webhook),
            _ => None,
        }
    }
}

/// A user-scoped ledger entry. Structurally unrelated to holdings/assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub source: TransactionSource,
    pub created_at: NaiveDateTime,
}

/// Payload for creating a ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: Decimal,
    #[serde(default)]
    pub kind: TransactionKind,
    pub category: String,
    pub description: Option<String>,
    /// Defaults to today when omitted.
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub source: TransactionSource,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category".to_string()).into());
        }
        if self.category.len() > 50 {
            return Err(ValidationError::InvalidInput(
                "category exceeds 50 characters".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

/// A card payment delivered through the webhook endpoint.
#[derive(Debug, Clone, Default)]
pub struct WebhookPayment {
    pub amount: Decimal,
    pub merchant: Option<String>,
    pub card: Option<String>,
    /// Raw date string from the sender, if any.
    pub date: Option<String>,
}
