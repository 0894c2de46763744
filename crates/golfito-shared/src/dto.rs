//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are optional so a missing field reaches the handler and is
//! reported like an empty one.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/verificar-usuario` and
/// `POST /api/auth/olvide-contrasena`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request to complete a password reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasswordResetCompletion {
    pub token: Option<String>,
    #[serde(rename = "nuevaContrasena")]
    pub new_password: Option<String>,
}

/// A user's public information. Never carries password material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "fechaRegistro")]
    pub created_at: String,
}
