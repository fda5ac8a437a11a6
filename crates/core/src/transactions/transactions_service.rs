use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::constants::{WEBHOOK_CATEGORY, WEBHOOK_DEFAULT_DESCRIPTION};
use crate::errors::Result;
use crate::transactions::transactions_model::{
    NewTransaction, Transaction, TransactionKind, TransactionSource, WebhookPayment,
};
use crate::transactions::transactions_traits::{
    TransactionRepositoryTrait, TransactionServiceTrait,
};

/// Service for the manual/webhook transaction ledger.
pub struct TransactionService {
    transactions: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(transactions: Arc<dyn TransactionRepositoryTrait>) -> Self {
        Self { transactions }
    }
}

/// Parses a webhook date string, tolerating a trailing time component.
/// Anything unparsable falls back to `today`.
pub fn parse_webhook_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    let Some(raw) = raw else {
        return today;
    };
    // Senders sometimes emit full ISO timestamps; keep the date part.
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").unwrap_or(today)
}

/// Builds a ledger description from the merchant and card fields.
pub fn webhook_description(merchant: Option<&str>, card: Option<&str>) -> String {
    let mut description = merchant
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(WEBHOOK_DEFAULT_DESCRIPTION)
        .to_string();
    if let Some(card) = card.filter(|c| !c.trim().is_empty()) {
        description.push_str(&format!(" ({})", card));
    }
    description
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.transactions.list_by_user(user_id)
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        mut new_transaction: NewTransaction,
        today: NaiveDate,
    ) -> Result<Transaction> {
        new_transaction.validate()?;
        if new_transaction.date.is_none() {
            new_transaction.date = Some(today);
        }
        new_transaction.source = TransactionSource::Manual;
        self.transactions.insert(user_id, new_transaction).await
    }

    async fn record_webhook_payment(
        &self,
        user_id: &str,
        payment: WebhookPayment,
        today: NaiveDate,
    ) -> Result<Transaction> {
        let date = parse_webhook_date(payment.date.as_deref(), today);
        let description = webhook_description(payment.merchant.as_deref(), payment.card.as_deref());

        self.transactions
            .insert(
                user_id,
                NewTransaction {
                    amount: payment.amount,
                    kind: TransactionKind::Expense,
                    category: WEBHOOK_CATEGORY.to_string(),
                    description: Some(description),
                    date: Some(date),
                    source: TransactionSource::Webhook,
                },
            )
            .await
    }
}
