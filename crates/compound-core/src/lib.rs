//! compound-core: stock session activation for the Compound dashboard.
//!
//! The dashboard's only wire contract is one `POST /api/process-stock` that
//! turns an entered stock name into a chat-ready session. This crate holds the
//! state machine around that call, the backend seam, and configuration.

pub mod activator;
pub mod backend;
pub mod config;
pub mod error;
pub mod session;

pub use activator::{ActivationOutcome, SessionActivator};
pub use backend::{dispatch, HttpStockBackend, StockBackend, PROCESS_STOCK_PATH};
pub use config::{DashboardConfig, DEFAULT_BACKEND_URL, DEFAULT_CONFIG_PATH};
pub use error::{ActivationError, ConfigError, REJECTED_FALLBACK, UNKNOWN_FALLBACK};
pub use session::{SessionPhase, SessionRequest, SessionState};
