use async_trait::async_trait;

use crate::domain::EmailMessage;
use crate::error::EmailError;

/// Outbound email transport (SMTP, API, log stub).
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver a message, or report why it could not be handed off.
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}
