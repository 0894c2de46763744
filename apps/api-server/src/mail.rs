//! Outbound email settings and message templates.

use anyhow::{Context, Result};
use golfito_core::domain::{EmailMessage, User};
use url::Url;

const DEFAULT_CRM_ADDRESS: &str = "info@assssa1.odoo.com";
const DEFAULT_RESET_URL_BASE: &str = "http://localhost:5500/restablecer-contrasena.html";

/// Addresses and links used when composing emails.
#[derive(Debug, Clone)]
pub struct MailSettings {
    /// Sender address for every outgoing message.
    pub from: String,
    /// Operations/CRM inbox notified of each registration.
    pub crm_address: String,
    /// Page that completes a reset; the token is appended as `?token=`.
    pub reset_url_base: Url,
    /// Brand shown in subjects.
    pub app_name: String,
}

impl MailSettings {
    pub fn from_env() -> Result<Self> {
        let reset_url_base = std::env::var("RESET_URL_BASE")
            .unwrap_or_else(|_| DEFAULT_RESET_URL_BASE.to_string());

        Ok(Self {
            from: std::env::var("EMAIL_USER").unwrap_or_else(|_| "no-reply@localhost".to_string()),
            crm_address: std::env::var("CRM_NOTIFY_EMAIL")
                .unwrap_or_else(|_| DEFAULT_CRM_ADDRESS.to_string()),
            reset_url_base: Url::parse(&reset_url_base)
                .with_context(|| format!("RESET_URL_BASE is not a valid URL: {}", reset_url_base))?,
            app_name: std::env::var("APP_NAME").unwrap_or_else(|_| "Golfito Tours".to_string()),
        })
    }

    /// Reset page URL carrying `token` as a query parameter.
    pub fn reset_link(&self, token: &str) -> Url {
        let mut link = self.reset_url_base.clone();
        link.query_pairs_mut().append_pair("token", token);
        link
    }

    /// Notice sent to the CRM inbox after a successful registration.
    pub fn registration_notice(&self, user: &User) -> EmailMessage {
        EmailMessage {
            from: self.from.clone(),
            to: self.crm_address.clone(),
            subject: "Nuevo registro de usuario (Sitio Web)".to_string(),
            text: Some(format!(
                "Nuevo usuario registrado:\n\nNombre: {}\nEmail: {}",
                user.name, user.email
            )),
            html: Some(format!(
                "<h3>Nuevo usuario registrado</h3><ul><li><b>Nombre:</b> {}</li><li><b>Email:</b> {}</li></ul>",
                escape_html(&user.name),
                escape_html(&user.email)
            )),
        }
    }

    /// Recovery email containing the reset link.
    pub fn password_reset(&self, to: &str, token: &str) -> EmailMessage {
        let link = self.reset_link(token);

        EmailMessage {
            from: self.from.clone(),
            to: to.to_string(),
            subject: format!("Recuperación de contraseña - {}", self.app_name),
            text: Some(format!(
                "Hola,\n\nHas solicitado restablecer tu contraseña. Abre el siguiente enlace para crear una nueva contraseña:\n\n{}\n\nSi no solicitaste este cambio, ignora este mensaje.",
                link
            )),
            html: Some(format!(
                "<p>Hola,</p><p>Has solicitado restablecer tu contraseña. Haz clic en el siguiente enlace para crear una nueva contraseña:</p><p><a href='{}'>Restablecer contraseña</a></p><p>Si no solicitaste este cambio, ignora este mensaje.</p>",
                escape_html(link.as_str())
            )),
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
pub(crate) fn test_settings() -> MailSettings {
    MailSettings {
        from: "no-reply@golfito.cr".to_string(),
        crm_address: "crm@golfito.cr".to_string(),
        reset_url_base: Url::parse(DEFAULT_RESET_URL_BASE).unwrap(),
        app_name: "Golfito Tours".to_string(),
    }
}
