//! Monitor configuration
//!
//! Webhook settings come from a YAML file supplied at startup; everything
//! else (environment, polling cadence, log directory) comes from the CLI.
//! The file is read once and the resulting config is read-only afterwards.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Webhook settings loaded from the configuration file
///
/// Recognized keys:
/// - `webhook_enabled` (bool, default false)
/// - `webhook_url` (string, optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonitorConfig {
    /// Whether webhook notifications should be sent at all
    #[serde(default)]
    pub webhook_enabled: bool,

    /// Endpoint the notification payload is posted to
    #[serde(default)]
    pub webhook_url: Option<String>,
}

impl MonitorConfig {
    /// Loads configuration from a YAML file
    ///
    /// A missing or malformed file is fatal and surfaces as an error with
    /// the offending path in the message; callers are expected to exit.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("configuration file not found: {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("error parsing configuration file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            "webhook_enabled: true\nwebhook_url: https://hooks.example.com/T000/B000\n",
        );
        let config = MonitorConfig::from_file(file.path()).unwrap();
        assert!(config.webhook_enabled);
        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://hooks.example.com/T000/B000")
        );
    }

    #[test]
    fn test_defaults_when_keys_absent() {
        let file = write_config("{}\n");
        let config = MonitorConfig::from_file(file.path()).unwrap();
        assert!(!config.webhook_enabled);
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = MonitorConfig::from_file("/nonexistent/monitor_config.yml").unwrap_err();
        assert!(err.to_string().contains("configuration file not found"));
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let file = write_config("webhook_enabled: [not, a, bool]\n");
        let err = MonitorConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("error parsing configuration file"));
    }
}
