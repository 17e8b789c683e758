//! Notification DTOs
//!
//! Wire schema for webhook delivery:
//! `{text, attachments: [{color, fields: [{title, value, short}]}]}`.

use serde::{Deserialize, Serialize};

/// Color indicator for an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// No failures observed
    Good,
    /// At least one failure observed
    Danger,
}

/// A single labeled field inside an attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl Field {
    /// Creates a short (column-layout) field
    pub fn short(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: true,
        }
    }
}

/// One attachment block with a color bar and labeled fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub color: Color,
    pub fields: Vec<Field>,
}

/// Top-level webhook message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub text: String,
    pub attachments: Vec<Attachment>,
}
