//! Transient operator notices.
//!
//! Every call to [`Notifications::notify`] produces a notice immediately.
//! Notices stack; each one expires a fixed time after it was created,
//! independently of the others.

use std::time::{Duration, Instant};

/// Default lifetime of a notice.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// One visible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub created: Instant,
}

impl Notice {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created) >= ttl
    }
}

/// Stack of live notices, oldest first.
#[derive(Debug, Clone)]
pub struct Notifications {
    ttl: Duration,
    notices: Vec<Notice>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            notices: Vec::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Show `message` now.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notify_at(message, severity, Instant::now());
    }

    /// Show `message` as if created at `created`.
    pub fn notify_at(&mut self, message: impl Into<String>, severity: Severity, created: Instant) {
        self.notices.push(Notice {
            message: message.into(),
            severity,
            created,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(message, Severity::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(message, Severity::Error);
    }

    /// Drop every notice whose lifetime has elapsed at `now`. Notices created
    /// after `now` are kept.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.notices.retain(|n| !n.is_expired(now, ttl));
    }

    /// Notices on screen at `now`, oldest first. A notice created after `now`
    /// is not shown yet.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Notice> {
        let ttl = self.ttl;
        self.notices
            .iter()
            .filter(move |n| n.created <= now && !n.is_expired(now, ttl))
    }

    /// Every notice not yet pruned, oldest first.
    pub fn all(&self) -> &[Notice] {
        &self.notices
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.notices.iter().filter(|n| n.severity == severity).count()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
