//! Authentication handlers.
//!
//! Each handler validates the body shape, makes its collaborator calls and
//! maps the outcome onto an `ApiResponse`. Validation always happens before
//! the first collaborator call.

use actix_web::{HttpResponse, web};

use golfito_core::domain::{NewUser, User};
use golfito_core::UserError;
use golfito_infra::users::mask_email;
use golfito_shared::ApiResponse;
use golfito_shared::dto::{
    EmailRequest, LoginRequest, PasswordResetCompletion, RegisterRequest, UserResponse,
};
use golfito_shared::validation::{
    is_valid_email, is_valid_name, is_valid_password, required, trim_name,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const EMAIL_REQUIRED: &str = "Email requerido";
const INVALID_EMAIL: &str = "Email inválido";
const PASSWORD_TOO_SHORT: &str = "La contraseña debe tener al menos 6 caracteres";

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        created_at: user.created_at.to_rfc3339(),
    }
}

/// POST /api/auth/verificar-usuario
pub async fn verify_user(
    state: web::Data<AppState>,
    body: web::Json<EmailRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = required(&req.email).ok_or_else(|| AppError::validation(EMAIL_REQUIRED))?;

    let user = state
        .users
        .user_exists(email)
        .await
        .map_err(AppError::internal)?;

    let response = match user {
        Some(_) => ApiResponse::ok("Usuario encontrado").with_exists(true),
        None => ApiResponse::ok("Usuario no encontrado").with_exists(false),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/auth/iniciar-sesion
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (Some(email), Some(password)) = (required(&req.email), required(&req.password)) else {
        return Err(AppError::validation("Email y contraseña son requeridos"));
    };

    tracing::info!(user_email = %mask_email(email), "Login attempt");

    // Unknown accounts are steered to registration rather than told "wrong password"
    if state
        .users
        .user_exists(email)
        .await
        .map_err(AppError::internal)?
        .is_none()
    {
        return Err(AppError::needs_registration());
    }

    let user = state
        .users
        .validate_user(email, password)
        .await
        .map_err(|err| match err {
            UserError::IncorrectPassword => AppError::unauthorized("Contraseña incorrecta"),
            UserError::NotFound => AppError::needs_registration(),
            other => AppError::internal(other),
        })?;

    tracing::info!(user_email = %mask_email(&user.email), "Login succeeded");

    Ok(HttpResponse::Ok()
        .json(ApiResponse::ok("Inicio de sesión exitoso").with_user(user_response(&user))))
}

/// POST /api/auth/registrar
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (Some(name), Some(email), Some(password)) = (
        required(&req.name),
        required(&req.email),
        required(&req.password),
    ) else {
        return Err(AppError::validation("Todos los campos son requeridos"));
    };

    if !is_valid_name(name) {
        return Err(AppError::validation(
            "El nombre debe tener al menos 2 caracteres",
        ));
    }
    if !is_valid_password(password) {
        return Err(AppError::validation(PASSWORD_TOO_SHORT));
    }
    if !is_valid_email(email) {
        return Err(AppError::validation(INVALID_EMAIL));
    }

    tracing::info!(user_email = %mask_email(email), "Registering user");

    let user = state
        .users
        .create_user(NewUser {
            name: trim_name(name).to_string(),
            email: email.to_lowercase(),
            password: password.to_string(),
        })
        .await
        .map_err(|err| match err {
            UserError::AlreadyExists => {
                AppError::Conflict("El email ya está registrado. ¿Quieres iniciar sesión?".into())
            }
            other => AppError::internal(other),
        })?;

    // Best effort: the response does not wait on the CRM notice
    let _ = state
        .notifications
        .dispatch(state.mail.registration_notice(&user));

    Ok(HttpResponse::Created()
        .json(ApiResponse::ok("Usuario registrado exitosamente").with_user(user_response(&user))))
}

/// POST /api/auth/olvide-contrasena
pub async fn request_password_reset(
    state: web::Data<AppState>,
    body: web::Json<EmailRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = required(&req.email).ok_or_else(|| AppError::validation(EMAIL_REQUIRED))?;
    if !is_valid_email(email) {
        return Err(AppError::validation(INVALID_EMAIL));
    }

    tracing::info!(user_email = %mask_email(email), "Password recovery requested");

    let token = state
        .users
        .create_recovery_token(email)
        .await
        .map_err(|err| match err {
            UserError::NotFound => {
                AppError::NotFound("No se encontró una cuenta con ese email".into())
            }
            other => AppError::internal(other),
        })?;

    state
        .mailer
        .send(state.mail.password_reset(email, &token))
        .await
        .map_err(AppError::Delivery)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Se ha enviado un correo con el enlace para restablecer tu contraseña. Si no lo recibes, revisa tu carpeta de spam.",
    )))
}

/// POST /api/auth/restablecer-contrasena
pub async fn complete_password_reset(
    state: web::Data<AppState>,
    body: web::Json<PasswordResetCompletion>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (Some(token), Some(new_password)) = (required(&req.token), required(&req.new_password))
    else {
        return Err(AppError::validation(
            "Token y nueva contraseña son requeridos",
        ));
    };
    if !is_valid_password(new_password) {
        return Err(AppError::validation(PASSWORD_TOO_SHORT));
    }

    state
        .users
        .reset_password(token, new_password)
        .await
        .map_err(|err| match err {
            UserError::Token(token_err) => AppError::Token(token_err),
            other => AppError::internal(other),
        })?;

    tracing::info!("Password reset completed");

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Contraseña restablecida exitosamente")))
}
