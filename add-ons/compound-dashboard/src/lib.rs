//! compound-dashboard: terminal front end for Compound.
//!
//! Header, sidebar and four pages. Only the chat page does anything: it
//! activates a stock session through `compound_core`. Research and compare
//! are inert placeholders.

pub mod app;
pub mod chat;
pub mod input;
pub mod navigation;
pub mod pages;
pub mod telemetry;
pub mod tui;

pub use app::{AppControl, DashboardApp, Focus, APP_TITLE};
pub use chat::ChatPage;
pub use navigation::{Route, SIDEBAR_LINKS};
