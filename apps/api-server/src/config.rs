//! Application configuration loaded from environment variables.

use std::env;

use anyhow::Result;
use golfito_infra::DatabaseConfig;
use golfito_infra::users::DEFAULT_TOKEN_TTL_MINUTES;

#[cfg(feature = "smtp")]
use golfito_infra::SmtpConfig;

use crate::mail::MailSettings;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Users database; in-memory storage when absent.
    pub database: Option<DatabaseConfig>,
    pub mail: MailSettings,
    /// Recovery token lifetime.
    pub token_ttl: chrono::Duration,
    /// SMTP transport; emails are only logged when absent.
    #[cfg(feature = "smtp")]
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            mail: MailSettings::from_env()?,
            token_ttl: chrono::Duration::minutes(
                env::var("RECOVERY_TOKEN_TTL_MINUTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES),
            ),
            #[cfg(feature = "smtp")]
            smtp: SmtpConfig::from_env()?,
        })
    }
}
