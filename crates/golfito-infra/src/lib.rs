//! # Golfito Infrastructure
//!
//! Concrete implementations of the ports defined in `golfito-core`:
//! user managers, password hashing and email transports.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory users and log-only email
//! - `postgres` - PostgreSQL user storage via SeaORM
//! - `smtp` - SMTP email delivery via lettre

pub mod auth;
pub mod database;
pub mod email;
pub mod users;

// Re-exports - always available
pub use auth::Argon2PasswordService;
pub use database::DatabaseConfig;
pub use email::LogEmailSender;
pub use users::InMemoryUserManager;

#[cfg(feature = "postgres")]
pub use users::PostgresUserManager;

#[cfg(feature = "smtp")]
pub use email::{SmtpConfig, SmtpEmailSender};
