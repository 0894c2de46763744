//! Application state - shared across all handlers.

use std::sync::Arc;

use golfito_core::ports::{EmailSender, PasswordService, UserManager};
use golfito_infra::{Argon2PasswordService, InMemoryUserManager, LogEmailSender};

#[cfg(feature = "postgres")]
use golfito_infra::PostgresUserManager;
#[cfg(feature = "smtp")]
use golfito_infra::SmtpEmailSender;

use crate::background::NotificationDispatcher;
use crate::config::AppConfig;
use crate::mail::MailSettings;
use crate::observability::AlertSender;

/// Shared application state. Collaborators are injected, never global.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserManager>,
    /// Emails the client waits on (password recovery).
    pub mailer: Arc<dyn EmailSender>,
    /// Emails nobody waits on (registration notice).
    pub notifications: NotificationDispatcher,
    pub mail: MailSettings,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserManager>,
        mailer: Arc<dyn EmailSender>,
        alerts: Arc<dyn AlertSender>,
        mail: MailSettings,
    ) -> Self {
        Self {
            users,
            notifications: NotificationDispatcher::new(mailer.clone(), alerts),
            mailer,
            mail,
        }
    }

    /// Build the state with the implementations the configuration selects.
    pub async fn from_config(
        config: &AppConfig,
        alerts: Arc<dyn AlertSender>,
    ) -> anyhow::Result<Self> {
        let hasher: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let users = build_user_manager(config, hasher).await;
        let mailer = build_mailer(config)?;

        tracing::info!("Application state initialized");
        Ok(Self::new(users, mailer, alerts, config.mail.clone()))
    }
}

#[cfg(feature = "postgres")]
async fn build_user_manager(
    config: &AppConfig,
    hasher: Arc<dyn PasswordService>,
) -> Arc<dyn UserManager> {
    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Arc::new(InMemoryUserManager::with_token_ttl(hasher, config.token_ttl));
    };

    match golfito_infra::database::connect(db_config).await {
        Ok(conn) => Arc::new(PostgresUserManager::with_token_ttl(
            conn,
            hasher,
            config.token_ttl,
        )),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            Arc::new(InMemoryUserManager::with_token_ttl(hasher, config.token_ttl))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_user_manager(
    config: &AppConfig,
    hasher: Arc<dyn PasswordService>,
) -> Arc<dyn UserManager> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without postgres feature");
    }
    tracing::info!("Running without postgres feature - using in-memory users");
    Arc::new(InMemoryUserManager::with_token_ttl(hasher, config.token_ttl))
}

#[cfg(feature = "smtp")]
fn build_mailer(config: &AppConfig) -> anyhow::Result<Arc<dyn EmailSender>> {
    match &config.smtp {
        Some(smtp) => Ok(Arc::new(SmtpEmailSender::new(smtp)?)),
        None => {
            tracing::warn!("SMTP_HOST not set. Emails will only be logged.");
            Ok(Arc::new(LogEmailSender))
        }
    }
}

#[cfg(not(feature = "smtp"))]
fn build_mailer(_config: &AppConfig) -> anyhow::Result<Arc<dyn EmailSender>> {
    tracing::info!("Running without smtp feature - emails will only be logged");
    Ok(Arc::new(LogEmailSender))
}
