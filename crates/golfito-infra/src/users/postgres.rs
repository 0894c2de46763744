//! PostgreSQL user manager.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, QueryFilter, Set,
};

use golfito_core::domain::{NewUser, RecoveryToken, User};
use golfito_core::ports::{PasswordService, UserManager};
use golfito_core::{TokenError, UserError};

use super::{DEFAULT_TOKEN_TTL_MINUTES, mask_email, normalize_email};
use crate::database::entity::user::{self, Entity as UserEntity};

/// PostgreSQL-backed user manager. Recovery tokens live on the user row.
pub struct PostgresUserManager {
    db: DbConn,
    hasher: Arc<dyn PasswordService>,
    token_ttl: Duration,
}

impl PostgresUserManager {
    pub fn new(db: DbConn, hasher: Arc<dyn PasswordService>) -> Self {
        Self::with_token_ttl(db, hasher, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
    }

    pub fn with_token_ttl(db: DbConn, hasher: Arc<dyn PasswordService>, token_ttl: Duration) -> Self {
        Self {
            db,
            hasher,
            token_ttl,
        }
    }

    async fn find_model(&self, email: &str) -> Result<Option<user::Model>, UserError> {
        let email = normalize_email(email);
        tracing::debug!(user_email = %mask_email(&email), "Finding user by email");

        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error)
    }
}

fn query_error(err: DbErr) -> UserError {
    UserError::Storage(err.to_string())
}

fn is_unique_violation(err: &DbErr) -> bool {
    let err_str = err.to_string();
    err_str.contains("duplicate") || err_str.contains("unique")
}

#[async_trait]
impl UserManager for PostgresUserManager {
    async fn user_exists(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self.find_model(email).await?.map(Into::into))
    }

    async fn validate_user(&self, email: &str, password: &str) -> Result<User, UserError> {
        let model = self.find_model(email).await?.ok_or(UserError::NotFound)?;

        if !self.hasher.verify(password, &model.password_hash)? {
            return Err(UserError::IncorrectPassword);
        }

        Ok(model.into())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UserError> {
        if self.find_model(&new_user.email).await?.is_some() {
            return Err(UserError::AlreadyExists);
        }

        let password_hash = self.hasher.hash(&new_user.password)?;
        let user = User::new(new_user.name, normalize_email(&new_user.email), password_hash);

        let active_model: user::ActiveModel = user.into();
        let model = active_model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::AlreadyExists
            } else {
                query_error(e)
            }
        })?;

        tracing::debug!(user_email = %mask_email(&model.email), "User created");
        Ok(model.into())
    }

    async fn create_recovery_token(&self, email: &str) -> Result<String, UserError> {
        let model = self.find_model(email).await?.ok_or(UserError::NotFound)?;
        let issued = RecoveryToken::issue(model.email.clone(), self.token_ttl);

        let mut active = model.into_active_model();
        active.recovery_token = Set(Some(issued.token.clone()));
        active.recovery_token_expires_at = Set(Some(issued.expires_at.into()));
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await.map_err(query_error)?;

        tracing::debug!(user_email = %mask_email(&issued.email), "Recovery token issued");
        Ok(issued.token)
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), UserError> {
        let model = UserEntity::find()
            .filter(user::Column::RecoveryToken.eq(token))
            .one(&self.db)
            .await
            .map_err(query_error)?
            .ok_or(TokenError::Invalid)?;

        let expired = model
            .recovery_token_expires_at
            .map(|expires_at| Utc::now() >= expires_at)
            .unwrap_or(true);
        if expired {
            return Err(TokenError::Expired.into());
        }

        let password_hash = self.hasher.hash(new_password)?;
        let now: DateTimeWithTimeZone = Utc::now().into();

        // Conditional on the token still being set, so only one concurrent reset wins
        let result = UserEntity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(user::Column::RecoveryToken, Expr::value(Option::<String>::None))
            .col_expr(
                user::Column::RecoveryTokenExpiresAt,
                Expr::value(Option::<DateTimeWithTimeZone>::None),
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(model.id))
            .filter(user::Column::RecoveryToken.eq(token))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        if result.rows_affected != 1 {
            return Err(TokenError::Invalid.into());
        }

        tracing::debug!(user_email = %mask_email(&model.email), "Password reset");
        Ok(())
    }

    async fn purge_expired_tokens(&self) -> Result<usize, UserError> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = UserEntity::update_many()
            .col_expr(user::Column::RecoveryToken, Expr::value(Option::<String>::None))
            .col_expr(
                user::Column::RecoveryTokenExpiresAt,
                Expr::value(Option::<DateTimeWithTimeZone>::None),
            )
            .filter(user::Column::RecoveryTokenExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected as usize)
    }
}
