//! Error types for stock session activation and configuration.

use std::time::Duration;
use thiserror::Error;

/// Shown when the backend rejects a request without a usable `detail`.
pub const REJECTED_FALLBACK: &str = "Failed to process stock";

/// Shown when a request failed before any response and carried no message.
pub const UNKNOWN_FALLBACK: &str = "An unknown error occurred";

/// Why an activation attempt did not reach `Ready`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivationError {
    /// The backend answered with a non-success status.
    #[error("{}", rejected_message(.detail))]
    Rejected { status: u16, detail: Option<String> },

    /// The request could not be completed (connect refused, reset, bad response).
    #[error("{}", transport_message(.0))]
    Transport(String),

    #[error("Request timed out after {}", format_limit(.0))]
    TimedOut(Duration),

    #[error("Request cancelled")]
    Cancelled,
}

impl ActivationError {
    /// Text for the inline error banner.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

fn rejected_message(detail: &Option<String>) -> &str {
    detail
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(REJECTED_FALLBACK)
}

fn transport_message(message: &str) -> &str {
    if message.trim().is_empty() {
        UNKNOWN_FALLBACK
    } else {
        message
    }
}

fn format_limit(limit: &Duration) -> String {
    if limit.subsec_millis() == 0 && limit.as_secs() > 0 {
        format!("{}s", limit.as_secs())
    } else {
        format!("{}ms", limit.as_millis())
    }
}

impl From<reqwest::Error> for ActivationError {
    fn from(err: reqwest::Error) -> Self {
        ActivationError::Transport(err.to_string())
    }
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid backend_url '{0}': expected an http:// or https:// address")]
    BackendUrl(String),
}
