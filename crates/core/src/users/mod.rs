//! Users module - minimal single-tenant user records.

mod users_model;
mod users_traits;

// Re-export the public interface
pub use users_model::User;
pub use users_traits::UserRepositoryTrait;
