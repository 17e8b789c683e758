//! Deployment environment
//!
//! Identifies which fleet a monitoring run is watching. The environment is
//! selected on the command line and shows up in notification payloads and
//! the monitor's own log-file name.

use serde::{Deserialize, Serialize};

/// Target deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    /// Lowercase form, used for file names and CLI round-tripping
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }

    /// Uppercase form, used in notification titles and fields
    pub fn label(&self) -> &'static str {
        match self {
            Environment::Dev => "DEV",
            Environment::Staging => "STAGING",
            Environment::Prod => "PROD",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_cli_values() {
        assert_eq!(
            Environment::from_str("staging", false).unwrap(),
            Environment::Staging
        );
        assert!(Environment::from_str("qa", false).is_err());
    }

    #[test]
    fn test_label_is_uppercase() {
        assert_eq!(Environment::Dev.label(), "DEV");
        assert_eq!(Environment::Prod.label(), "PROD");
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Environment::Staging.to_string(), "staging");
    }
}
