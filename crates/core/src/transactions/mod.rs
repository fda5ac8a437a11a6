//! Transactions module - the manual/webhook spending ledger.

mod transactions_model;
mod transactions_service;
mod transactions_traits;

// Re-export the public interface
pub use transactions_model::{
    NewTransaction, Transaction, TransactionKind, TransactionSource, WebhookPayment,
};
pub use transactions_service::{parse_webhook_date, webhook_description, TransactionService};
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
