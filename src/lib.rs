//! # firewall-console
//!
//! Terminal console for a network-security monitoring backend.
//!
//! The console polls the backend for traffic samples, connection logs,
//! threat alerts and dashboard stats, filters them locally, and renders a
//! live chart plus filterable tables. The operator can inject synthetic
//! traffic events and block or resolve entries straight from the tables.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           UI loop thread                         │
//! │  ┌────────┐  tick   ┌───────────┐  fetch/submit  ┌────────────┐  │
//! │  │ events │───────▶│    app     │───────────────▶│    sync    │  │
//! │  │ (keys) │        │  (state)   │◀── Completion ─│(dispatcher)│  │
//! │  └────────┘        └─────┬──────┘                └─────┬──────┘  │
//! │                          │ data: filter, table, chart  │ spawn   │
//! │                          ▼                             ▼         │
//! │                     ┌────────┐                  ┌────────────┐   │
//! │                     │   ui   │                  │   source   │   │
//! │                     └────────┘                  │ Http/Demo  │   │
//! │                                                 └────────────┘   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: owns all view state; applies completions, submits events,
//!   handles row actions
//! - **[`sync`]**: refresh scheduling (cadence, backoff, stale-response
//!   ordering) and the dispatcher that runs requests on the tokio runtime
//! - **[`source`]**: the [`Backend`] trait with HTTP and in-process demo
//!   implementations
//! - **[`data`]**: wire model, IP validation, filters, table rows and chart
//!   binding
//! - **[`notify`]**: stacked, self-expiring notices
//! - **[`ui`]**: ratatui rendering
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Connect to a backend
//! firewall-console --url http://127.0.0.1:8000
//!
//! # Run against the built-in demo backend
//! firewall-console --demo
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::sync::Arc;
//! use firewall_console::{App, AppOptions, DemoBackend};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let app = App::new(Arc::new(DemoBackend::new()), runtime.handle().clone(), AppOptions::default());
//! assert!(app.log_table.is_empty());
//! ```

pub mod actions;
pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod logging;
pub mod notify;
pub mod source;
pub mod sync;
pub mod ui;

// Re-export main types for convenience
pub use actions::{ActionHandler, RowAction};
pub use app::{App, AppOptions, View};
pub use config::Settings;
pub use data::{is_valid_ip, EventKind, LogEntry, ThreatAlert, TrafficPoint};
pub use error::ConsoleError;
pub use notify::{Notifications, Severity};
pub use source::{Backend, DemoBackend, HttpBackend};
pub use sync::{Completion, Feed, PollingScheduler};
