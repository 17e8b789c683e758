//! Fleetwatch Webhook Client
//!
//! A small, type-safe HTTP client for delivering deployment-status
//! notifications to a chat-style webhook endpoint.
//!
//! # Example
//!
//! ```no_run
//! use fleetwatch_client::WebhookClient;
//! use fleetwatch_core::dto::notification::{Attachment, Color, NotificationMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WebhookClient::new("https://hooks.example.com/T000/B000")?;
//!
//!     client.send(&NotificationMessage {
//!         text: "Deployment Status - PROD".to_string(),
//!         attachments: vec![Attachment { color: Color::Good, fields: vec![] }],
//!     }).await?;
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{ClientError, Result};

use std::time::Duration;

use fleetwatch_core::dto::notification::NotificationMessage;
use reqwest::Client;
use tracing::debug;

/// Every outbound request identifies the tool
const USER_AGENT: &str = concat!("fleetwatch/", env!("CARGO_PKG_VERSION"));

/// How long a single delivery attempt may take end to end
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for a single webhook endpoint
#[derive(Debug, Clone)]
pub struct WebhookClient {
    /// Full webhook URL the payload is posted to
    url: String,
    /// HTTP client instance
    client: Client,
}

impl WebhookClient {
    /// Create a new webhook client with the default timeout and user agent
    ///
    /// # Arguments
    /// * `url` - The full webhook endpoint URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(url, client))
    }

    /// Create a new webhook client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Get the endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Deliver a notification with a single JSON POST
    ///
    /// Any non-success status code becomes a [`ClientError::ApiError`];
    /// transport failures and timeouts become [`ClientError::RequestFailed`].
    pub async fn send(&self, message: &NotificationMessage) -> Result<()> {
        debug!("Posting notification to {}", self.url);

        let response = self.client.post(&self.url).json(message).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = WebhookClient::new("https://hooks.example.com/T000/B000").unwrap();
        assert_eq!(client.url(), "https://hooks.example.com/T000/B000");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = WebhookClient::with_client("https://hooks.example.com/x", http_client);
        assert_eq!(client.url(), "https://hooks.example.com/x");
    }

    #[test]
    fn test_error_classification() {
        assert!(ClientError::api_error(404, "missing").is_client_error());
        assert!(ClientError::api_error(500, "boom").is_server_error());
        assert!(!ClientError::api_error(302, "redirect").is_client_error());
    }
}
