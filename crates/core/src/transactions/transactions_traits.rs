use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::transactions::transactions_model::{NewTransaction, Transaction, WebhookPayment};

/// Trait for transaction repository operations.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// A user's ledger, ordered by (date desc, created_at desc).
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Transaction>>;
    async fn insert(&self, user_id: &str, new_transaction: NewTransaction) -> Result<Transaction>;
}

/// Trait for transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
        today: NaiveDate,
    ) -> Result<Transaction>;
    /// Records a card payment from the webhook as an expense.
    async fn record_webhook_payment(
        &self,
        user_id: &str,
        payment: WebhookPayment,
        today: NaiveDate,
    ) -> Result<Transaction>;
}
