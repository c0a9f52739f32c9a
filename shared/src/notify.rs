//! User-facing notifications
//!
//! Every failure goes through one path: the action that failed decides the
//! message and how loudly it is reported.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a notification is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Logged for diagnostics only, never shown
    Silent,
    /// Shown, does not interrupt
    Notice,
    /// Shown and must be acknowledged
    Alert,
}

/// A backend-facing action that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    GeneratePlan,
    GenerateImage,
    ReadAloud,
    ExportPdf,
    Motivation,
}

impl Action {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Action::GeneratePlan => "Failed to generate plan",
            Action::GenerateImage => "Failed to generate image",
            Action::ReadAloud => "Failed to read plan",
            Action::ExportPdf => "Failed to export PDF",
            Action::Motivation => "Failed to load motivation",
        }
    }

    pub fn failure_severity(&self) -> Severity {
        match self {
            Action::Motivation => Severity::Silent,
            _ => Severity::Alert,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::GeneratePlan => "generate-plan",
            Action::GenerateImage => "generate-image",
            Action::ReadAloud => "read-aloud",
            Action::ExportPdf => "export-pdf",
            Action::Motivation => "motivation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    /// Underlying cause, for logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Notification {
    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Alert,
            message: message.into(),
            detail: None,
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Notice,
            message: message.into(),
            detail: None,
        }
    }

    /// Notification for a failed action, at that action's severity
    pub fn failed(action: Action, reason: impl Into<String>) -> Self {
        Self {
            severity: action.failure_severity(),
            message: action.failure_message().to_string(),
            detail: Some(reason.into()),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.severity > Severity::Silent
    }
}
