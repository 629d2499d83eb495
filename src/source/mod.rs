//! Backend abstraction for the console's feeds and commands.
//!
//! The console talks to its backend only through the [`Backend`] trait:
//! three polled feeds (traffic, logs, threats), an aggregate stats feed, and
//! the `/simulate` command. [`HttpBackend`] speaks the HTTP contract;
//! [`DemoBackend`] keeps everything in process for offline demos.

mod demo;
mod http;

pub use demo::DemoBackend;
pub use http::HttpBackend;

use async_trait::async_trait;

use crate::data::{DashboardStats, EventKind, LogEntry, ThreatAlert, TrafficPoint};
use crate::error::ConsoleError;

/// Source of feed data and sink of simulated events.
///
/// Every method is a single request; implementations must not retry.
///
/// # Example
///
/// ```
/// use firewall_console::source::{Backend, DemoBackend};
/// use firewall_console::data::EventKind;
///
/// # tokio_test::block_on(async {
/// let backend = DemoBackend::new();
/// backend.simulate("10.0.0.1", &EventKind::Syn).await.unwrap();
/// assert_eq!(backend.logs().await.unwrap().len(), 1);
/// # });
/// ```
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/traffic`
    async fn traffic(&self) -> Result<Vec<TrafficPoint>, ConsoleError>;

    /// `GET /api/logs`
    async fn logs(&self) -> Result<Vec<LogEntry>, ConsoleError>;

    /// `GET /api/threats`
    async fn threats(&self) -> Result<Vec<ThreatAlert>, ConsoleError>;

    /// `GET /api/stats`
    async fn stats(&self) -> Result<DashboardStats, ConsoleError>;

    /// `POST /simulate`. Succeeds only if the backend reports the event as logged.
    async fn simulate(&self, ip: &str, event: &EventKind) -> Result<(), ConsoleError>;

    /// Human-readable description for the status bar.
    fn description(&self) -> &str;
}
