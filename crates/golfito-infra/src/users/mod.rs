//! User manager implementations - PostgreSQL and in-memory fallback.

mod memory;

#[cfg(feature = "postgres")]
mod postgres;

pub use memory::InMemoryUserManager;

#[cfg(feature = "postgres")]
pub use postgres::PostgresUserManager;

/// Default lifetime of a recovery token.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Emails are stored and compared lowercase.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email for logging to avoid PII in logs: `j***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{}***", first),
                _ => "***".to_string(),
            };
            format!("{}{}", masked_local, domain)
        }
        None => "***".to_string(),
    }
}
