//! User-facing notifications

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl Severity {
    /// How long a toast of this severity stays on screen
    pub fn display_ms(&self) -> u64 {
        match self {
            Severity::Success => 3000,
            Severity::Error => 5000,
            Severity::Info => 3000,
            Severity::Warning => 4000,
        }
    }
}

/// A message for the user, rendered by whatever front end is attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}
