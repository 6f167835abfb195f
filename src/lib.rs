//! Zekat: terminal search client for zakat and Islamic-finance research.
//!
//! Typed input flows through a small pipeline:
//! Input → Debouncer → View controller → Research source → Renderer
//!
//! # Architecture
//!
//! - **Debouncer**: forwards only the latest input after a quiet period
//! - **View controller**: owns the idle/loading/success/error state and
//!   discards results that belong to superseded queries
//! - **Research source**: the [`zekat_search`] webhook client, which falls
//!   back to a built-in demo corpus when the remote is unusable
//! - **Health monitor**: probes the webhook in the background and
//!   publishes its reachability
//! - **History**: the last few submitted queries, persisted as JSON
//! - **Renderer**: turns the view state into terminal text

pub mod app_dirs;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod history;
pub mod render;
pub mod session;
pub mod status;

pub use config::AppConfig;
pub use controller::{ViewController, ViewState};
pub use error::{AppError, Result};
pub use history::SearchHistory;
pub use session::Session;
pub use status::{ApiStatus, HealthMonitor};
