//! The response envelope every auth endpoint answers with.

use serde::{Deserialize, Serialize};

use crate::dto::UserResponse;

/// Uniform API response.
///
/// `exito` and `mensaje` are always present; the remaining fields are only
/// serialized by the endpoints that use them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(rename = "exito")]
    pub success: bool,

    #[serde(rename = "mensaje")]
    pub message: String,

    #[serde(rename = "existe", default, skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,

    #[serde(rename = "usuario", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,

    #[serde(
        rename = "necesitaRegistro",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub needs_registration: Option<bool>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            exists: None,
            user: None,
            needs_registration: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::ok(message)
        }
    }

    pub fn with_exists(mut self, exists: bool) -> Self {
        self.exists = Some(exists);
        self
    }

    pub fn with_user(mut self, user: UserResponse) -> Self {
        self.user = Some(user);
        self
    }

    pub fn needing_registration(mut self) -> Self {
        self.needs_registration = Some(true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_failure_only_has_envelope_fields() {
        let json = serde_json::to_value(ApiResponse::failure("Email requerido")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "exito": false, "mensaje": "Email requerido" })
        );
    }

    #[test]
    fn optional_fields_use_wire_names() {
        let json = serde_json::to_value(
            ApiResponse::failure("Usuario no encontrado").needing_registration(),
        )
        .unwrap();
        assert_eq!(json["necesitaRegistro"], true);

        let json = serde_json::to_value(ApiResponse::ok("Usuario encontrado").with_exists(true))
            .unwrap();
        assert_eq!(json["existe"], true);
        assert_eq!(json["exito"], true);
    }
}
