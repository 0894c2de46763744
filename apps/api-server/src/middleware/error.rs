//! Error handling - every failure renders as an `ApiResponse` envelope.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use golfito_core::{EmailError, TokenError};
use golfito_shared::ApiResponse;
use std::fmt;

pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";
pub const DELIVERY_ERROR_MESSAGE: &str =
    "No se pudo enviar el correo de recuperación. Intenta de nuevo más tarde.";
pub const NEEDS_REGISTRATION_MESSAGE: &str = "Usuario no encontrado. ¿Necesitas registrarte?";
pub const MALFORMED_BODY_MESSAGE: &str = "Solicitud inválida";

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input, detected before any collaborator call.
    Validation(String),
    Unauthorized {
        message: String,
        needs_registration: bool,
    },
    NotFound(String),
    Conflict(String),
    /// Rejected recovery token; the token error's message is returned as-is.
    Token(TokenError),
    /// An email the client is waiting on could not be handed off.
    Delivery(EmailError),
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized {
            message: message.into(),
            needs_registration: false,
        }
    }

    /// 401 telling the client the account does not exist yet.
    pub fn needs_registration() -> Self {
        AppError::Unauthorized {
            message: NEEDS_REGISTRATION_MESSAGE.to_string(),
            needs_registration: true,
        }
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::Unauthorized { message, .. } => write!(f, "Unauthorized: {}", message),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Token(err) => write!(f, "Token rejected: {}", err),
            AppError::Delivery(err) => write!(f, "Email delivery failed: {}", err),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Token(_) => StatusCode::BAD_REQUEST,
            AppError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                ApiResponse::failure(msg.clone())
            }
            AppError::Unauthorized {
                message,
                needs_registration,
            } => {
                let body = ApiResponse::failure(message.clone());
                if *needs_registration {
                    body.needing_registration()
                } else {
                    body
                }
            }
            AppError::Token(err) => ApiResponse::failure(err.to_string()),
            AppError::Delivery(err) => {
                tracing::error!(error = %err, "Email delivery failed");
                ApiResponse::failure(DELIVERY_ERROR_MESSAGE)
            }
            AppError::Internal(detail) => {
                // Detail stays in the logs
                tracing::error!("Internal error: {}", detail);
                ApiResponse::failure(INTERNAL_ERROR_MESSAGE)
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Answers unparseable JSON bodies with the standard envelope instead of
/// actix's plain-text 400.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    AppError::validation(MALFORMED_BODY_MESSAGE).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_needs_registration_shape() {
        let (status, json) = body_json(AppError::needs_registration()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["exito"], false);
        assert_eq!(json["necesitaRegistro"], true);
        assert_eq!(json["mensaje"], NEEDS_REGISTRATION_MESSAGE);
    }

    #[actix_web::test]
    async fn test_token_error_message_is_forwarded() {
        let (status, json) = body_json(AppError::Token(TokenError::Expired)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["mensaje"], "Token expirado");
    }

    #[actix_web::test]
    async fn test_internal_detail_is_hidden() {
        let (status, json) = body_json(AppError::internal("connection refused")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["mensaje"], INTERNAL_ERROR_MESSAGE);
        assert!(json.get("necesitaRegistro").is_none());
    }

    #[actix_web::test]
    async fn test_delivery_failure_is_distinct_from_internal() {
        let (status, json) =
            body_json(AppError::Delivery(EmailError::Transport("timeout".into()))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["mensaje"], DELIVERY_ERROR_MESSAGE);
    }
}
