//! Ports - trait definitions for external collaborators.
//! These are the "interfaces" that infrastructure must implement.

mod email;
mod password;
mod users;

pub use email::EmailSender;
pub use password::{PasswordError, PasswordService};
pub use users::UserManager;
