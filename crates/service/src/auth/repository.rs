use async_trait::async_trait;
use models::user;

use super::errors::AuthError;

/// Repository abstraction for auth-related persistence. Implemented by
/// [`crate::store::seaorm::SeaOrmStore`] in production and by
/// [`crate::store::memory::MemoryStore`] in tests, so the same store backs
/// both the lifecycle workflows and authentication.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Look up a live (non-tombstoned) user by email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>, AuthError>;

    /// Insert a freshly registered user; Conflict on a duplicate email.
    async fn insert_user(&self, user: user::Model) -> Result<user::Model, AuthError>;
}
