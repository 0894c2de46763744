use async_trait::async_trait;

use crate::domain::{NewUser, User};
use crate::error::UserError;

/// User management collaborator.
///
/// Implementations own credential storage and recovery tokens. Email
/// arguments are matched case-insensitively.
#[async_trait]
pub trait UserManager: Send + Sync {
    /// Look up a user by email.
    async fn user_exists(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Check credentials.
    ///
    /// Fails with [`UserError::NotFound`] or [`UserError::IncorrectPassword`].
    async fn validate_user(&self, email: &str, password: &str) -> Result<User, UserError>;

    /// Create an account. Fails with [`UserError::AlreadyExists`] when the
    /// email is taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserError>;

    /// Issue a recovery token for the account, replacing any previous one.
    async fn create_recovery_token(&self, email: &str) -> Result<String, UserError>;

    /// Consume a recovery token and set a new password.
    ///
    /// Fails with [`UserError::Token`] when the token is unknown or expired.
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), UserError>;

    /// Drop recovery tokens past their expiry. Returns how many were removed.
    async fn purge_expired_tokens(&self) -> Result<usize, UserError>;
}
