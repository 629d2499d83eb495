//! Data models and the pure parts of the presentation pipeline.
//!
//! ## Submodules
//!
//! - [`model`]: Wire types for the backend feeds ([`LogEntry`], [`ThreatAlert`], [`TrafficPoint`])
//! - [`ip`]: Dotted-quad validation for operator input
//! - [`filter`]: Log and threat filter engines
//! - [`table`]: Row reconciliation with badges, actions and sanitized cells
//! - [`chart`]: Traffic chart binding
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "5s", "500ms")
//!
//! ## Data Flow
//!
//! ```text
//! Backend response (JSON)
//!        │
//!        ▼
//! Vec<LogEntry> / Vec<ThreatAlert>  ──▶ filter_logs / filter_threats
//!        │                                       │
//!        │                                       ▼
//!        │                             LogTable / ThreatTable::replace
//!        ▼
//! Vec<TrafficPoint> ──▶ ChartData::bind
//! ```

pub mod chart;
pub mod duration;
pub mod filter;
pub mod ip;
pub mod model;
pub mod table;

pub use chart::{ChartData, ChartStyle};
pub use filter::{filter_logs, filter_threats, EventFilter, FilterState, TypeFilter};
pub use ip::is_valid_ip;
pub use model::{
    DashboardStats, EventKind, LogEntry, SimulateRequest, SimulateResponse, ThreatAlert,
    TrafficPoint,
};
pub use table::{badge_for, sanitize, Badge, LogRow, LogTable, ThreatRow, ThreatTable};
