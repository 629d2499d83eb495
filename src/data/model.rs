//! Wire models for the backend feeds.
//!
//! These types mirror the JSON bodies of `/api/logs`, `/api/threats`,
//! `/api/traffic`, `/api/stats` and `/simulate`. They are immutable once
//! fetched; the console never edits an entry locally.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of a logged traffic event.
///
/// Parsing is case-insensitive. Anything the console does not know about is
/// kept verbatim in [`EventKind::Other`] so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Normal,
    Syn,
    Blocked,
    Other(String),
}

impl EventKind {
    /// The kinds an operator can submit or filter on.
    pub const SUBMITTABLE: [EventKind; 3] = [EventKind::Normal, EventKind::Syn, EventKind::Blocked];

    /// Wire representation (`NORMAL`, `SYN`, `BLOCKED`, or the raw value).
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::Normal => "NORMAL",
            EventKind::Syn => "SYN",
            EventKind::Blocked => "BLOCKED",
            EventKind::Other(raw) => raw,
        }
    }
}

impl From<String> for EventKind {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "NORMAL" => EventKind::Normal,
            "SYN" => EventKind::Syn,
            "BLOCKED" => EventKind::Blocked,
            _ => EventKind::Other(raw),
        }
    }
}

impl From<&str> for EventKind {
    fn from(raw: &str) -> Self {
        EventKind::from(raw.to_string())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One connection log row from `/api/logs`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogEntry {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub event: EventKind,
}

/// One threat alert from `/api/threats`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ThreatAlert {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub alert_type: String,
    /// Free-form detail text; not every backend sends it.
    #[serde(default)]
    pub description: Option<String>,
}

/// One sample of the traffic time series.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TrafficPoint {
    pub time: String,
    pub traffic: f64,
}

/// Aggregate counters from `/api/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DashboardStats {
    pub total_traffic: u64,
    pub active_threats: u64,
    pub blocked_ips: u64,
    pub recent_activity: u64,
}

/// Body posted to `/simulate`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulateRequest<'a> {
    pub ip_address: &'a str,
    pub event: &'a str,
}

/// Body returned by `/simulate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulateResponse {
    #[serde(default)]
    pub status: Option<String>,
}

impl SimulateResponse {
    /// Status value signalling the event was stored.
    pub const ACCEPTED: &'static str = "logged";

    pub fn is_accepted(&self) -> bool {
        self.status.as_deref() == Some(Self::ACCEPTED)
    }
}

/// Format an instant for table cells (local time, second precision).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Parse the timestamp formats backends are known to emit.
///
/// Accepts RFC 3339, SQLite's `YYYY-MM-DD HH:MM:SS[.fff]` (taken as UTC) and
/// RFC 2822.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.and_utc());
        }
    }
    DateTime::parse_from_rfc2822(raw).ok().map(|ts| ts.with_timezone(&Utc))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp: {raw}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Uint(u64),
    Text(String),
}

fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_event_kind_parses_case_insensitively() {
        assert_eq!(EventKind::from("syn"), EventKind::Syn);
        assert_eq!(EventKind::from("Blocked"), EventKind::Blocked);
        assert_eq!(EventKind::from("NORMAL"), EventKind::Normal);
        assert_eq!(EventKind::from("RST"), EventKind::Other("RST".to_string()));
    }

    #[test]
    fn test_log_entry_accepts_numeric_id_and_sqlite_timestamp() {
        let json = r#"{"id": 42, "timestamp": "2024-03-01 12:30:05", "ip_address": "10.0.0.1", "event": "SYN"}"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "42");
        assert_eq!(entry.event, EventKind::Syn);
        assert_eq!(entry.timestamp.year(), 2024);
        assert_eq!(entry.timestamp.minute(), 30);
    }

    #[test]
    fn test_threat_accepts_rfc2822_timestamp() {
        let json = r#"{"id": "t-1", "timestamp": "Fri, 01 Mar 2024 12:30:05 GMT", "ip_address": "10.0.0.9", "alert_type": "SYN Flood"}"#;
        let alert: ThreatAlert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.id, "t-1");
        assert_eq!(alert.timestamp.hour(), 12);
        assert!(alert.description.is_none());
    }

    #[test]
    fn test_garbage_timestamp_is_malformed() {
        let json = r#"{"id": 1, "timestamp": "yesterday", "ip_address": "10.0.0.1", "event": "SYN"}"#;
        assert!(serde_json::from_str::<LogEntry>(json).is_err());
    }

    #[test]
    fn test_simulate_response_acceptance() {
        let ok: SimulateResponse = serde_json::from_str(r#"{"status": "logged"}"#).unwrap();
        assert!(ok.is_accepted());

        let other: SimulateResponse = serde_json::from_str(r#"{"status": "queued"}"#).unwrap();
        assert!(!other.is_accepted());

        let error: SimulateResponse = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert!(!error.is_accepted());
    }

    #[test]
    fn test_event_kind_serializes_to_wire_value() {
        let body = serde_json::to_string(&EventKind::Blocked).unwrap();
        assert_eq!(body, r#""BLOCKED""#);
    }
}
