//! In-memory user manager - used when no database is configured.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use golfito_core::domain::{NewUser, RecoveryToken, User};
use golfito_core::ports::{PasswordService, UserManager};
use golfito_core::{TokenError, UserError};

use super::{DEFAULT_TOKEN_TTL_MINUTES, mask_email, normalize_email};

/// In-memory user manager keyed by lowercase email.
///
/// Note: Accounts and tokens are lost on process restart.
pub struct InMemoryUserManager {
    users: RwLock<HashMap<String, User>>,
    tokens: RwLock<HashMap<String, RecoveryToken>>,
    hasher: Arc<dyn PasswordService>,
    token_ttl: Duration,
}

impl InMemoryUserManager {
    pub fn new(hasher: Arc<dyn PasswordService>) -> Self {
        Self::with_token_ttl(hasher, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
    }

    pub fn with_token_ttl(hasher: Arc<dyn PasswordService>, token_ttl: Duration) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            tokens: RwLock::new(HashMap::new()),
            hasher,
            token_ttl,
        }
    }
}

#[async_trait]
impl UserManager for InMemoryUserManager {
    async fn user_exists(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.get(&normalize_email(email)).cloned())
    }

    async fn validate_user(&self, email: &str, password: &str) -> Result<User, UserError> {
        let user = self
            .user_exists(email)
            .await?
            .ok_or(UserError::NotFound)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(UserError::IncorrectPassword);
        }

        Ok(user)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UserError> {
        let email = normalize_email(&new_user.email);
        let password_hash = self.hasher.hash(&new_user.password)?;

        let mut users = self.users.write().await;
        if users.contains_key(&email) {
            return Err(UserError::AlreadyExists);
        }

        let user = User::new(new_user.name, email.clone(), password_hash);
        users.insert(email, user.clone());

        tracing::debug!(user_email = %mask_email(&user.email), "User created");
        Ok(user)
    }

    async fn create_recovery_token(&self, email: &str) -> Result<String, UserError> {
        let email = normalize_email(email);
        if !self.users.read().await.contains_key(&email) {
            return Err(UserError::NotFound);
        }

        let issued = RecoveryToken::issue(email.clone(), self.token_ttl);
        let token = issued.token.clone();

        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, existing| existing.email != email);
        tokens.insert(token.clone(), issued);

        tracing::debug!(user_email = %mask_email(&email), "Recovery token issued");
        Ok(token)
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), UserError> {
        let expired = match self.tokens.read().await.get(token) {
            Some(recovery) => recovery.is_expired_at(Utc::now()),
            None => return Err(TokenError::Invalid.into()),
        };
        if expired {
            self.tokens.write().await.remove(token);
            return Err(TokenError::Expired.into());
        }

        // A hashing failure must leave the token usable
        let password_hash = self.hasher.hash(new_password)?;

        // Removal decides the winner between concurrent resets
        let recovery = self
            .tokens
            .write()
            .await
            .remove(token)
            .ok_or(TokenError::Invalid)?;

        let mut users = self.users.write().await;
        let user = users
            .get_mut(&recovery.email)
            .ok_or(TokenError::Invalid)?;
        user.password_hash = password_hash;
        user.updated_at = Utc::now();

        tracing::debug!(user_email = %mask_email(&recovery.email), "Password reset");
        Ok(())
    }

    async fn purge_expired_tokens(&self) -> Result<usize, UserError> {
        let now = Utc::now();
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired_at(now));
        Ok(before - tokens.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Argon2PasswordService;
    use golfito_core::ports::PasswordError;

    fn manager() -> InMemoryUserManager {
        InMemoryUserManager::new(Arc::new(Argon2PasswordService::new()))
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Jo".to_string(),
            email: email.to_string(),
            password: "123456".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_validate() {
        let users = manager();
        let created = users.create_user(new_user("Jo@Example.com")).await.unwrap();
        assert_eq!(created.email, "jo@example.com");

        let found = users.validate_user("jo@example.com", "123456").await.unwrap();
        assert_eq!(found.id, created.id);

        assert!(users.user_exists("JO@EXAMPLE.COM").await.unwrap().is_some());
        assert!(users.user_exists("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validate_failures() {
        let users = manager();
        users.create_user(new_user("a@b.com")).await.unwrap();

        assert!(matches!(
            users.validate_user("a@b.com", "wrong-pass").await,
            Err(UserError::IncorrectPassword)
        ));
        assert!(matches!(
            users.validate_user("nope@b.com", "123456").await,
            Err(UserError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let users = manager();
        users.create_user(new_user("a@b.com")).await.unwrap();

        let result = users.create_user(new_user("A@B.com")).await;
        assert!(matches!(result, Err(UserError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_recovery_token_resets_password_once() {
        let users = manager();
        users.create_user(new_user("a@b.com")).await.unwrap();

        let token = users.create_recovery_token("a@b.com").await.unwrap();
        users.reset_password(&token, "abcdef").await.unwrap();

        assert!(users.validate_user("a@b.com", "abcdef").await.is_ok());
        assert!(matches!(
            users.reset_password(&token, "ghijkl").await,
            Err(UserError::Token(TokenError::Invalid))
        ));
    }

    /// Refuses to hash one specific password.
    struct PickyHasher(Argon2PasswordService);

    impl PasswordService for PickyHasher {
        fn hash(&self, password: &str) -> Result<String, PasswordError> {
            if password == "rejected" {
                return Err(PasswordError::Hashing("salt source unavailable".into()));
            }
            self.0.hash(password)
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
            self.0.verify(password, hash)
        }
    }

    #[tokio::test]
    async fn test_hashing_failure_keeps_token() {
        let users = InMemoryUserManager::new(Arc::new(PickyHasher(Argon2PasswordService::new())));
        users.create_user(new_user("a@b.com")).await.unwrap();
        let token = users.create_recovery_token("a@b.com").await.unwrap();

        assert!(matches!(
            users.reset_password(&token, "rejected").await,
            Err(UserError::Internal(_))
        ));
        users.reset_password(&token, "abcdef").await.unwrap();
        assert!(users.validate_user("a@b.com", "abcdef").await.is_ok());
    }

    #[tokio::test]
    async fn test_new_token_replaces_previous() {
        let users = manager();
        users.create_user(new_user("a@b.com")).await.unwrap();

        let first = users.create_recovery_token("a@b.com").await.unwrap();
        let second = users.create_recovery_token("a@b.com").await.unwrap();

        assert!(matches!(
            users.reset_password(&first, "abcdef").await,
            Err(UserError::Token(TokenError::Invalid))
        ));
        assert!(users.reset_password(&second, "abcdef").await.is_ok());
    }

    #[tokio::test]
    async fn test_recovery_token_for_unknown_user() {
        let users = manager();
        assert!(matches!(
            users.create_recovery_token("ghost@b.com").await,
            Err(UserError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected_and_purged() {
        let users =
            InMemoryUserManager::with_token_ttl(Arc::new(Argon2PasswordService::new()), Duration::zero());
        users.create_user(new_user("a@b.com")).await.unwrap();

        let token = users.create_recovery_token("a@b.com").await.unwrap();
        assert!(matches!(
            users.reset_password(&token, "abcdef").await,
            Err(UserError::Token(TokenError::Expired))
        ));

        users.create_recovery_token("a@b.com").await.unwrap();
        assert_eq!(users.purge_expired_tokens().await.unwrap(), 1);
        assert_eq!(users.purge_expired_tokens().await.unwrap(), 0);
    }
}
