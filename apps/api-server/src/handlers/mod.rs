//! HTTP handlers and route configuration.

mod auth;
mod health;


use actix_web::web;

use crate::middleware::error::json_error_handler;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Undecodable bodies get the same envelope as every other failure
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));

    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/verificar-usuario", web::post().to(auth::verify_user))
                    .route("/iniciar-sesion", web::post().to(auth::login))
                    .route("/registrar", web::post().to(auth::register))
                    .route(
                        "/olvide-contrasena",
                        web::post().to(auth::request_password_reset),
                    )
                    .route(
                        "/restablecer-contrasena",
                        web::post().to(auth::complete_password_reset),
                    ),
            ),
    );
}
