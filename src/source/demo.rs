//! In-process backend for running the console without a server.
//!
//! Mirrors the observable behavior of the firewall backend: simulated events
//! are stored as logs, repeated SYN events from one address raise a
//! `SYN Flood` threat, and the traffic feed is a fresh random series on
//! every call.
//!
//! The console blocks through `/simulate` and resolves without a backend
//! call, so the server's block-ip and resolve-threat endpoints have no
//! counterpart here: blocking adds a `BLOCKED` log but no threat, and threats
//! are never removed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, Utc};

use super::Backend;
use crate::data::{DashboardStats, EventKind, LogEntry, ThreatAlert, TrafficPoint};
use crate::error::ConsoleError;

/// SYN events from one address within a minute that raise a threat.
pub const SYN_THRESHOLD: usize = 5;

/// Window over which SYN events are counted, in seconds.
const SYN_WINDOW_SECS: i64 = 60;

/// Rows returned by the log and threat feeds.
const FEED_LIMIT: usize = 20;

/// Points in one traffic series.
const TRAFFIC_POINTS: i64 = 10;

/// Spacing between traffic points.
const TRAFFIC_STEP_SECS: i64 = 5;

#[derive(Debug, Default)]
struct Store {
    logs: Vec<LogEntry>,
    threats: Vec<ThreatAlert>,
    next_log_id: u64,
    next_threat_id: u64,
}

impl Store {
    fn insert_log(&mut self, ip: &str, event: EventKind, at: DateTime<Utc>) {
        self.next_log_id += 1;
        self.logs.push(LogEntry {
            id: self.next_log_id.to_string(),
            timestamp: at,
            ip_address: ip.to_string(),
            event,
        });
    }

    fn insert_threat(&mut self, ip: &str, alert_type: &str, description: String, at: DateTime<Utc>) {
        self.next_threat_id += 1;
        self.threats.push(ThreatAlert {
            id: self.next_threat_id.to_string(),
            timestamp: at,
            ip_address: ip.to_string(),
            alert_type: alert_type.to_string(),
            description: Some(description),
        });
    }

    fn recent_syn_count(&self, ip: &str, now: DateTime<Utc>) -> usize {
        let since = now - Duration::seconds(SYN_WINDOW_SECS);
        self.logs
            .iter()
            .filter(|l| l.ip_address == ip && l.event == EventKind::Syn && l.timestamp >= since)
            .count()
    }
}

/// Backend that keeps logs and threats in memory.
#[derive(Debug, Default)]
pub struct DemoBackend {
    store: Mutex<Store>,
}

impl DemoBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record an event at `at`, running threat detection for SYN events.
    pub fn record_at(&self, ip: &str, event: EventKind, at: DateTime<Utc>) {
        let mut store = self.store();
        let is_syn = event == EventKind::Syn;
        store.insert_log(ip, event, at);

        if is_syn {
            let count = store.recent_syn_count(ip, at);
            if count >= SYN_THRESHOLD {
                tracing::info!(ip, count, "demo backend raised SYN Flood threat");
                store.insert_threat(
                    ip,
                    "SYN Flood",
                    format!("{} SYN events in the last minute", count),
                    at,
                );
            }
        }
    }

    fn newest_first<T: Clone>(items: &[T], timestamp: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
        // reversed first so equal timestamps list the latest insert first
        let mut sorted: Vec<T> = items.iter().rev().cloned().collect();
        sorted.sort_by_key(|item| std::cmp::Reverse(timestamp(item)));
        sorted.truncate(FEED_LIMIT);
        sorted
    }
}

#[async_trait]
impl Backend for DemoBackend {
    async fn traffic(&self) -> Result<Vec<TrafficPoint>, ConsoleError> {
        let now = Local::now();
        Ok((0..TRAFFIC_POINTS)
            .map(|i| TrafficPoint {
                time: (now - Duration::seconds((TRAFFIC_POINTS - i) * TRAFFIC_STEP_SECS))
                    .format("%H:%M:%S")
                    .to_string(),
                traffic: fastrand::u32(10..=100) as f64,
            })
            .collect())
    }

    async fn logs(&self) -> Result<Vec<LogEntry>, ConsoleError> {
        let store = self.store();
        Ok(Self::newest_first(&store.logs, |l| l.timestamp))
    }

    async fn threats(&self) -> Result<Vec<ThreatAlert>, ConsoleError> {
        let store = self.store();
        Ok(Self::newest_first(&store.threats, |t| t.timestamp))
    }

    async fn stats(&self) -> Result<DashboardStats, ConsoleError> {
        let store = self.store();
        let now = Utc::now();
        let day_ago = now - Duration::days(1);
        let hour_ago = now - Duration::hours(1);

        let mut blocked: Vec<&str> = store
            .logs
            .iter()
            .filter(|l| l.event == EventKind::Blocked && l.timestamp >= day_ago)
            .map(|l| l.ip_address.as_str())
            .collect();
        blocked.sort_unstable();
        blocked.dedup();

        Ok(DashboardStats {
            total_traffic: store.logs.len() as u64,
            active_threats: store.threats.len() as u64,
            blocked_ips: blocked.len() as u64,
            recent_activity: store.logs.iter().filter(|l| l.timestamp >= hour_ago).count() as u64,
        })
    }

    async fn simulate(&self, ip: &str, event: &EventKind) -> Result<(), ConsoleError> {
        self.record_at(ip, event.clone(), Utc::now());
        Ok(())
    }

    fn description(&self) -> &str {
        "demo: in-process backend"
    }
}
