//! Log-only sender used when SMTP is not configured.

use async_trait::async_trait;

use golfito_core::EmailError;
use golfito_core::domain::EmailMessage;
use golfito_core::ports::EmailSender;

use crate::users::mask_email;

/// Local dev sender that logs the message instead of delivering it.
#[derive(Clone, Debug, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        tracing::info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            body = message.text.as_deref().or(message.html.as_deref()).unwrap_or_default(),
            "Email send stub"
        );
        Ok(())
    }
}
