//! Webhook notifier
//!
//! Formats a snapshot into the chat-style attachment payload and hands it
//! to the webhook client. Delivery is best effort: every failure mode is
//! returned as an explicit result for the monitor loop to log, never
//! propagated further.

use chrono::Local;
use fleetwatch_client::{ClientError, WebhookClient};
use fleetwatch_core::domain::environment::Environment;
use fleetwatch_core::domain::snapshot::Snapshot;
use fleetwatch_core::dto::notification::{Attachment, Color, Field, NotificationMessage};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::MonitorConfig;

/// Why a notification was not delivered
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Webhook is enabled but no endpoint URL is configured
    #[error("webhook URL not configured")]
    MissingUrl,

    /// The HTTP delivery itself failed
    #[error(transparent)]
    Delivery(#[from] ClientError),
}

/// What happened to a notification request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Payload was posted and accepted
    Sent,
    /// Webhook delivery is disabled; nothing was attempted
    Skipped,
}

/// Sends deployment status notifications to the configured webhook
pub struct Notifier {
    enabled: bool,
    environment: Environment,
    client: Option<WebhookClient>,
}

impl Notifier {
    /// Creates a notifier from the loaded configuration
    ///
    /// The HTTP client is only built when a URL is present; a bad URL or
    /// client-build failure surfaces later as a delivery error.
    pub fn new(config: &MonitorConfig, environment: Environment) -> Self {
        let client = config
            .webhook_url
            .as_ref()
            .and_then(|url| match WebhookClient::new(url) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("Failed to build webhook client: {}", e);
                    None
                }
            });

        Self {
            enabled: config.webhook_enabled,
            environment,
            client,
        }
    }

    /// Sends a status notification for the given snapshot
    ///
    /// No network call is made when the webhook is disabled or when no URL
    /// is configured. The caller checks the result; nothing here retries.
    pub async fn notify(&self, snapshot: &Snapshot) -> Result<Delivery, NotifyError> {
        if !self.enabled {
            return Ok(Delivery::Skipped);
        }

        let Some(client) = &self.client else {
            return Err(NotifyError::MissingUrl);
        };

        client.send(&build_payload(snapshot, self.environment)).await?;

        info!("Webhook notification sent successfully");
        Ok(Delivery::Sent)
    }
}

/// Builds the notification payload for a snapshot
///
/// The color bar is `good` only when no failures were observed.
pub fn build_payload(snapshot: &Snapshot, environment: Environment) -> NotificationMessage {
    let color = if snapshot.failed == 0 {
        Color::Good
    } else {
        Color::Danger
    };

    NotificationMessage {
        text: format!("Deployment Status - {}", environment.label()),
        attachments: vec![Attachment {
            color,
            fields: vec![
                Field::short("Environment", environment.label()),
                Field::short("Total Hosts", snapshot.total_hosts.to_string()),
                Field::short("Completed", snapshot.completed.to_string()),
                Field::short("Failed", snapshot.failed.to_string()),
                Field::short("In Progress", snapshot.in_progress.to_string()),
                Field::short(
                    "Timestamp",
                    Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                ),
            ],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot(failed: usize) -> Snapshot {
        Snapshot {
            total_hosts: 4,
            completed: 3,
            failed,
            in_progress: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_disabled_webhook_skips_without_network() {
        let config = MonitorConfig {
            webhook_enabled: false,
            webhook_url: Some("https://hooks.example.com/x".to_string()),
        };
        let notifier = Notifier::new(&config, Environment::Dev);

        let result = notifier.notify(&sample_snapshot(0)).await;
        assert_eq!(result.unwrap(), Delivery::Skipped);
    }

    #[tokio::test]
    async fn test_enabled_without_url_fails_without_network() {
        let config = MonitorConfig {
            webhook_enabled: true,
            webhook_url: None,
        };
        let notifier = Notifier::new(&config, Environment::Dev);

        let result = notifier.notify(&sample_snapshot(0)).await;
        assert!(matches!(result, Err(NotifyError::MissingUrl)));
    }

    #[test]
    fn test_payload_color_good_when_no_failures() {
        let payload = build_payload(&sample_snapshot(0), Environment::Staging);
        assert_eq!(payload.attachments[0].color, Color::Good);
    }

    #[test]
    fn test_payload_color_danger_on_any_failure() {
        let payload = build_payload(&sample_snapshot(1), Environment::Staging);
        assert_eq!(payload.attachments[0].color, Color::Danger);
    }

    #[test]
    fn test_payload_fields() {
        let payload = build_payload(&sample_snapshot(2), Environment::Prod);
        assert_eq!(payload.text, "Deployment Status - PROD");

        let fields = &payload.attachments[0].fields;
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0].title, "Environment");
        assert_eq!(fields[0].value, "PROD");
        assert_eq!(fields[1].value, "4");
        assert_eq!(fields[2].value, "3");
        assert_eq!(fields[3].value, "2");
        assert_eq!(fields[4].value, "1");
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(fields[5].value.len(), 19);
    }
}
