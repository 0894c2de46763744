//! SMTP email sender built on lettre.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use golfito_core::EmailError;
use golfito_core::domain::EmailMessage;
use golfito_core::ports::EmailSender;

/// SMTP transport configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub tls: bool,
}

impl SmtpConfig {
    /// Load from the environment. Returns `Ok(None)` when `SMTP_HOST` is unset.
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(host) = std::env::var("SMTP_HOST") else {
            return Ok(None);
        };

        Ok(Some(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .context("SMTP_PORT must be a valid port number")?,
            username: std::env::var("SMTP_USERNAME").context("SMTP_USERNAME must be set")?,
            password: std::env::var("SMTP_PASSWORD").context("SMTP_PASSWORD must be set")?,
            tls: std::env::var("SMTP_TLS").map(|v| v != "false").unwrap_or(true),
        }))
    }
}

/// Sends messages through an SMTP relay.
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailSender {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());

        let transport = if config.tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .context("Failed to create SMTP relay")?
                .port(config.port)
                .credentials(creds)
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .credentials(creds)
                .build()
        };

        tracing::info!(host = %config.host, port = config.port, "SMTP transport configured");
        Ok(Self { transport })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address
        .parse()
        .map_err(|_| EmailError::InvalidAddress(address.to_string()))
}

/// Build a lettre message: multipart/alternative when both bodies are set.
fn build_message(message: EmailMessage) -> Result<Message, EmailError> {
    let builder = Message::builder()
        .from(parse_mailbox(&message.from)?)
        .to(parse_mailbox(&message.to)?)
        .subject(message.subject);

    let built = match (message.text, message.html) {
        (Some(text), Some(html)) => builder.multipart(MultiPart::alternative_plain_html(text, html)),
        (None, Some(html)) => builder.singlepart(SinglePart::html(html)),
        (Some(text), None) => builder.header(ContentType::TEXT_PLAIN).body(text),
        (None, None) => builder.header(ContentType::TEXT_PLAIN).body(String::new()),
    };

    built.map_err(|e| EmailError::Build(e.to_string()))
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let email = build_message(message)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| EmailError::Transport(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> EmailMessage {
        EmailMessage {
            from: "no-reply@golfito.cr".to_string(),
            to: "ana@example.com".to_string(),
            subject: "Hola".to_string(),
            text: Some("texto".to_string()),
            html: Some("<p>html</p>".to_string()),
        }
    }

    #[test]
    fn test_build_alternative_message() {
        let built = build_message(message()).unwrap();
        let raw = String::from_utf8(built.formatted()).unwrap();

        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("Subject: Hola"));
    }

    #[test]
    fn test_build_html_only_message() {
        let mut msg = message();
        msg.text = None;

        let raw = String::from_utf8(build_message(msg).unwrap().formatted()).unwrap();
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_invalid_recipient_is_reported() {
        let mut msg = message();
        msg.to = "not an address".to_string();

        assert!(matches!(
            build_message(msg),
            Err(EmailError::InvalidAddress(addr)) if addr == "not an address"
        ));
    }
}
