//! Best-effort email dispatch on a detached task.

use std::sync::Arc;

use golfito_core::domain::EmailMessage;
use golfito_core::ports::EmailSender;
use golfito_infra::users::mask_email;
use tokio::task::JoinHandle;

use crate::observability::{AlertMessage, AlertSender};

const ALERT_TARGET: &str = "api_server::notifications";

/// Sends emails the caller must not wait on.
///
/// Failures never reach the request that triggered them; they are reported
/// to the alert hook instead.
#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: Arc<dyn EmailSender>,
    alerts: Arc<dyn AlertSender>,
}

impl NotificationDispatcher {
    pub fn new(sender: Arc<dyn EmailSender>, alerts: Arc<dyn AlertSender>) -> Self {
        Self { sender, alerts }
    }

    /// Spawn delivery of `message` and return immediately.
    pub fn dispatch(&self, message: EmailMessage) -> JoinHandle<()> {
        let sender = self.sender.clone();
        let alerts = self.alerts.clone();

        tokio::spawn(async move {
            let to = mask_email(&message.to);
            let subject = message.subject.clone();

            match sender.send(message).await {
                Ok(()) => tracing::info!(to = %to, subject = %subject, "Notification email sent"),
                Err(err) => {
                    tracing::warn!(to = %to, subject = %subject, error = %err, "Notification email failed");

                    let alert = AlertMessage::error(ALERT_TARGET, format!("Notification email failed: {}", err))
                        .with_field("to", to)
                        .with_field("subject", subject);
                    if let Err(e) = alerts.send(alert).await {
                        tracing::warn!(error = %e, "Could not report notification failure");
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use golfito_core::EmailError;

    use super::*;
    use crate::observability::AlertError;

    struct StubSender {
        fail: bool,
        sent: Mutex<Vec<EmailMessage>>,
    }

    #[async_trait]
    impl EmailSender for StubSender {
        async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
            if self.fail {
                return Err(EmailError::Transport("connection refused".into()));
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingAlerts(Mutex<Vec<AlertMessage>>);

    #[async_trait]
    impl AlertSender for RecordingAlerts {
        async fn send(&self, alert: AlertMessage) -> Result<(), AlertError> {
            self.0.lock().unwrap().push(alert);
            Ok(())
        }
    }

    fn message() -> EmailMessage {
        EmailMessage {
            from: "no-reply@golfito.cr".into(),
            to: "crm@golfito.cr".into(),
            subject: "Nuevo registro de usuario (Sitio Web)".into(),
            text: Some("Nombre: Jo".into()),
            html: None,
        }
    }

    #[tokio::test]
    async fn test_successful_dispatch_raises_no_alert() {
        let sender = Arc::new(StubSender { fail: false, sent: Mutex::default() });
        let alerts = Arc::new(RecordingAlerts::default());
        let dispatcher = NotificationDispatcher::new(sender.clone(), alerts.clone());

        dispatcher.dispatch(message()).await.unwrap();

        assert_eq!(sender.sent.lock().unwrap().len(), 1);
        assert!(alerts.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_dispatch_reaches_alert_hook() {
        let sender = Arc::new(StubSender { fail: true, sent: Mutex::default() });
        let alerts = Arc::new(RecordingAlerts::default());
        let dispatcher = NotificationDispatcher::new(sender, alerts.clone());

        dispatcher.dispatch(message()).await.unwrap();

        let recorded = alerts.0.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].target, ALERT_TARGET);
        assert!(recorded[0].message.contains("connection refused"));
        assert!(recorded[0].fields.contains(&("to".to_string(), "c***@golfito.cr".to_string())));
    }
}
