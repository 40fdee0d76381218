//! Stock session state machine.
//!
//! ```text
//!            begin() [identifier.trim() != ""]
//!   ┌──────┐ ─────────────────────────────────▶ ┌─────────┐   settle(Ok)   ┌───────┐
//!   │ Idle │                                    │ Pending │ ─────────────▶ │ Ready │
//!   └──────┘ ◀───────────────────────────────── └─────────┘                └───────┘
//!                 settle(Err) / error set
//! ```
//!
//! There is no transition out of `Ready`.

use crate::error::ActivationError;
use serde::Serialize;

/// Phase of one activation flow. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Awaiting input (also where a failed attempt lands).
    #[default]
    Idle,
    /// Request in flight.
    Pending,
    /// Backend acknowledged the stock.
    Ready,
}

/// Payload for `POST /api/process-stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRequest {
    #[serde(rename = "stockName")]
    pub stock_name: String,
}

/// Client-side state for one activation flow.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    identifier: String,
    phase: SessionPhase,
    error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == SessionPhase::Pending
    }

    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the identifier. Only accepted while `Idle`; returns whether it was applied.
    pub fn set_identifier(&mut self, identifier: impl Into<String>) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }
        self.identifier = identifier.into();
        true
    }

    /// Append one character to the identifier (keyboard input). Idle only.
    pub fn push_char(&mut self, c: char) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }
        self.identifier.push(c);
        true
    }

    /// Remove the last character of the identifier. Idle only.
    pub fn pop_char(&mut self) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }
        self.identifier.pop().is_some()
    }

    /// `Idle → Pending`. Returns the request to send, or `None` when the guard
    /// fails, in which case nothing changes.
    pub fn begin(&mut self) -> Option<SessionRequest> {
        if self.phase != SessionPhase::Idle || self.identifier.trim().is_empty() {
            return None;
        }
        self.error = None;
        self.phase = SessionPhase::Pending;
        Some(SessionRequest {
            stock_name: self.identifier.clone(),
        })
    }

    /// Settle an in-flight attempt. Ignored unless `Pending`; never leaves `Pending` set.
    pub fn settle(&mut self, outcome: Result<(), ActivationError>) {
        if self.phase != SessionPhase::Pending {
            return;
        }
        match outcome {
            Ok(()) => {
                self.phase = SessionPhase::Ready;
            }
            Err(err) => {
                self.error = Some(err.user_message());
                self.phase = SessionPhase::Idle;
            }
        }
    }
}
