//! Telemetry initialization - tracing and alerting setup.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::observability::{
    AlertConfig, AlertLayer, AlertSender, ConsoleAlertSender, WebhookAlertSender,
};

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Enable JSON logging (for production).
    pub json_logs: bool,
    /// Service name attached to the startup event.
    pub service_name: String,
    /// Forward ERROR events to the alert sender.
    pub alerts_enabled: bool,
    /// Webhook URL for alerts (Slack, Discord, etc.).
    pub alert_webhook_url: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            service_name: "golfito-auth".to_string(),
            alerts_enabled: true,
            alert_webhook_url: None,
        }
    }
}

impl TelemetryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            service_name: std::env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "golfito-auth".to_string()),
            alerts_enabled: std::env::var("ALERTS_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            alert_webhook_url: std::env::var("ALERT_WEBHOOK_URL").ok(),
        }
    }

    /// The alert channel: webhook when configured, console otherwise.
    pub fn alert_sender(&self) -> Arc<dyn AlertSender> {
        match &self.alert_webhook_url {
            Some(url) => Arc::new(WebhookAlertSender::new(url.clone())),
            None => Arc::new(ConsoleAlertSender),
        }
    }
}

/// Initialize tracing and alerting.
///
/// Returns the alert sender so detached tasks can report to the same channel.
/// Must be called from within the tokio runtime.
pub fn init_telemetry(config: &TelemetryConfig) -> Arc<dyn AlertSender> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,api_server=debug,golfito_infra=debug,sea_orm=warn")
    });

    let alert_sender = config.alert_sender();
    let alert_layer = config
        .alerts_enabled
        .then(|| AlertLayer::new(alert_sender.clone(), AlertConfig::default()));

    // Build and init subscriber based on log format
    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .with(alert_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .with(alert_layer)
            .init();
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        alerts_enabled = config.alerts_enabled,
        alert_webhook = config.alert_webhook_url.is_some(),
        "Telemetry initialized"
    );

    alert_sender
}
