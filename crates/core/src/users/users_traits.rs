use async_trait::async_trait;

use crate::errors::Result;
use crate::users::users_model::User;

/// Trait for user repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// The oldest user row, if any. Webhook transactions are attributed to it.
    fn first_user(&self) -> Result<Option<User>>;
    /// Returns the first user, creating `username` when the table is empty.
    async fn ensure_default(&self, username: &str) -> Result<User>;
}
