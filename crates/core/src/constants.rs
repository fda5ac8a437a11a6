/// Currency assigned to portfolios created without an explicit one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Username of the user row ensured at server startup (single-tenant mode).
pub const DEFAULT_USERNAME: &str = "demo";

/// Category assigned to ledger entries created through the payment webhook.
pub const WEBHOOK_CATEGORY: &str = "Card Payment";

/// Description used when a webhook payload carries no merchant.
pub const WEBHOOK_DEFAULT_DESCRIPTION: &str = "Transaction";
