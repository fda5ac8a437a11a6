use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An account owner. The server runs single-tenant: one default user is
/// ensured at startup and all user-scoped operations resolve to the first
/// user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub created_at: NaiveDateTime,
}
