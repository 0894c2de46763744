//! Domain entities - the core business objects.

mod email;
mod user;

pub use email::EmailMessage;
pub use user::{NewUser, RecoveryToken, User};
