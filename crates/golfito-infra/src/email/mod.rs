//! Email senders - SMTP via lettre and a logging stub for local development.

mod log;

#[cfg(feature = "smtp")]
mod smtp;

pub use self::log::LogEmailSender;

#[cfg(feature = "smtp")]
pub use smtp::{SmtpConfig, SmtpEmailSender};
