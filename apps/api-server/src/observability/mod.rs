//! Observability module - request IDs and alerting.

mod alert;
mod request_id;

pub use alert::{
    AlertConfig, AlertError, AlertLayer, AlertMessage, AlertSender, ConsoleAlertSender,
    WebhookAlertSender,
};
pub use request_id::RequestIdMiddleware;
