//! Domain-level error types.
//!
//! Messages are user-facing Spanish text; the HTTP layer decides which of
//! them are safe to return verbatim.

use thiserror::Error;

/// Failures reported by a [`UserManager`](crate::ports::UserManager).
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Usuario no encontrado")]
    NotFound,

    #[error("Contraseña incorrecta")]
    IncorrectPassword,

    #[error("El usuario ya existe")]
    AlreadyExists,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Recovery token rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token inválido")]
    Invalid,

    #[error("Token expirado")]
    Expired,
}

/// Failures reported by an [`EmailSender`](crate::ports::EmailSender).
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Transport failed: {0}")]
    Transport(String),
}
