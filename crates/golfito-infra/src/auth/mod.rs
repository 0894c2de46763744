//! Credential helpers.

mod password;

pub use password::Argon2PasswordService;
