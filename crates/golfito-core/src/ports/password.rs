//! Password hashing port.

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Malformed hash: {0}")]
    MalformedHash(String),
}

impl From<PasswordError> for crate::error::UserError {
    fn from(err: PasswordError) -> Self {
        crate::error::UserError::Internal(err.to_string())
    }
}
