//! Session Activator: one guarded attempt per call, settled on every path.

use crate::backend::{dispatch, StockBackend};
use crate::error::ActivationError;
use crate::session::{SessionPhase, SessionState};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Result of a single `activate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Blank identifier, or the flow is not `Idle`. No request was issued.
    Skipped,
    Ready,
    /// Back to `Idle`; carries the banner text.
    Failed(String),
}

/// Owns one session flow and the backend it activates against.
pub struct SessionActivator<B: ?Sized> {
    backend: Arc<B>,
    state: SessionState,
    timeout: Option<Duration>,
}

impl<B: StockBackend + ?Sized> SessionActivator<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: SessionState::new(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Activate without an abort signal. Waits for the backend (or the
    /// configured timeout).
    pub async fn activate(&mut self, identifier: &str) -> ActivationOutcome {
        self.activate_with_abort(identifier, std::future::pending())
            .await
    }

    /// Activate, giving up with "Request cancelled" as soon as `abort` resolves.
    pub async fn activate_with_abort<F>(&mut self, identifier: &str, abort: F) -> ActivationOutcome
    where
        F: Future<Output = ()>,
    {
        if identifier.trim().is_empty() {
            tracing::debug!("activation skipped: blank identifier");
            return ActivationOutcome::Skipped;
        }
        if !self.state.set_identifier(identifier) {
            tracing::debug!(phase = ?self.state.phase(), "activation skipped: flow not idle");
            return ActivationOutcome::Skipped;
        }
        let Some(request) = self.state.begin() else {
            tracing::debug!("activation skipped: blank identifier");
            return ActivationOutcome::Skipped;
        };

        tracing::info!(stock = %request.stock_name, "processing stock");
        let mut guard = PendingGuard::new(&mut self.state);
        let result = dispatch(self.backend.as_ref(), &request, self.timeout, abort).await;
        match &result {
            Ok(()) => tracing::info!(stock = %request.stock_name, "stock ready for chat"),
            Err(e) => tracing::warn!(stock = %request.stock_name, error = %e, "stock processing failed"),
        }
        guard.finish(result);
        drop(guard);

        match self.state.error() {
            None if self.state.is_ready() => ActivationOutcome::Ready,
            Some(message) => ActivationOutcome::Failed(message.to_string()),
            None => ActivationOutcome::Failed(ActivationError::Transport(String::new()).user_message()),
        }
    }
}

/// Settles the session when dropped, so `Pending` never outlives the attempt:
/// a dropped future settles as cancelled, a panic as an unknown error.
struct PendingGuard<'a> {
    state: &'a mut SessionState,
    outcome: Option<Result<(), ActivationError>>,
}

impl<'a> PendingGuard<'a> {
    fn new(state: &'a mut SessionState) -> Self {
        Self {
            state,
            outcome: None,
        }
    }

    fn finish(&mut self, outcome: Result<(), ActivationError>) {
        self.outcome = Some(outcome);
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let outcome = self.outcome.take().unwrap_or_else(|| {
            if std::thread::panicking() {
                Err(ActivationError::Transport(String::new()))
            } else {
                Err(ActivationError::Cancelled)
            }
        });
        self.state.settle(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionRequest;
    use async_trait::async_trait;

    struct NeverAnswers;

    #[async_trait]
    impl StockBackend for NeverAnswers {
        async fn process_stock(&self, _request: &SessionRequest) -> Result<(), ActivationError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn dropped_attempt_does_not_stay_pending() {
        let mut activator = SessionActivator::new(Arc::new(NeverAnswers));
        {
            let attempt = activator.activate("AAPL");
            let _ = tokio::time::timeout(Duration::from_millis(20), attempt).await;
        }
        assert_eq!(activator.phase(), SessionPhase::Idle);
        assert_eq!(activator.state().error(), Some("Request cancelled"));
    }

    #[tokio::test]
    async fn timeout_settles_to_idle() {
        let mut activator = SessionActivator::new(Arc::new(NeverAnswers))
            .with_timeout(Some(Duration::from_millis(10)));
        let outcome = activator.activate("AAPL").await;
        assert_eq!(outcome, ActivationOutcome::Failed("Request timed out after 10ms".into()));
        assert!(!activator.state().is_pending());
    }
}
