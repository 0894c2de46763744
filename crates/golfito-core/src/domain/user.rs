use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User entity - a registered account.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields needed to create an account. The password is plain text; hashing
/// is the user manager's job.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A single-use credential authorizing one password reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryToken {
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl RecoveryToken {
    /// Issue a fresh random token for `email` valid for `ttl`.
    pub fn issue(email: impl Into<String>, ttl: Duration) -> Self {
        Self {
            token: Uuid::new_v4().simple().to_string(),
            email: email.into(),
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
