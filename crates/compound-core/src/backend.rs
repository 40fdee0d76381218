//! Stock backend seam and its HTTP implementation.
//!
//! The dashboard only knows one endpoint: `POST {backend_url}/api/process-stock`
//! with `{"stockName": "..."}`. A 2xx status means the stock is ready for chat;
//! anything else carries an optional JSON `detail` string.

use crate::config::DashboardConfig;
use crate::error::ActivationError;
use crate::session::SessionRequest;
use async_trait::async_trait;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Path of the activation endpoint, relative to the backend base URL.
pub const PROCESS_STOCK_PATH: &str = "/api/process-stock";

/// Anything that can acknowledge a stock for a chat session.
#[async_trait]
pub trait StockBackend: Send + Sync {
    /// One attempt. No retries.
    async fn process_stock(&self, request: &SessionRequest) -> Result<(), ActivationError>;
}

/// `reqwest`-based backend talking to the stock analysis service.
#[derive(Debug, Clone)]
pub struct HttpStockBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpStockBackend {
    /// Backend posting to a full endpoint URL (including `/api/process-stock`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.process_stock_url())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Failure body shape. Anything else is treated as "no detail".
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

fn parse_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.is_empty())
}

#[async_trait]
impl StockBackend for HttpStockBackend {
    async fn process_stock(&self, request: &SessionRequest) -> Result<(), ActivationError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await?;
        let detail = parse_detail(&body);
        tracing::debug!(
            status = status.as_u16(),
            has_detail = detail.is_some(),
            "process-stock rejected"
        );
        Err(ActivationError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

/// Run exactly one attempt against `backend`, racing it against an optional
/// timeout and an abort signal. The first to finish decides the outcome.
pub async fn dispatch<B, F>(
    backend: &B,
    request: &SessionRequest,
    timeout: Option<Duration>,
    abort: F,
) -> Result<(), ActivationError>
where
    B: StockBackend + ?Sized,
    F: Future<Output = ()>,
{
    let attempt = async {
        match timeout {
            Some(limit) => match tokio::time::timeout(limit, backend.process_stock(request)).await {
                Ok(result) => result,
                Err(_) => Err(ActivationError::TimedOut(limit)),
            },
            None => backend.process_stock(request).await,
        }
    };

    tokio::select! {
        result = attempt => result,
        _ = abort => Err(ActivationError::Cancelled),
    }
}
