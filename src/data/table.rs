//! Table reconciliation for the log and threat views.
//!
//! A table is rebuilt from scratch every time it receives a result set; rows
//! are never patched in place. Each row holds display-ready, sanitized cell
//! text plus the actions it offers.

use std::borrow::Cow;

use super::model::{format_timestamp, EventKind, LogEntry, ThreatAlert};
use crate::actions::RowAction;

/// Visual classification of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warning,
    Danger,
}

impl Badge {
    /// Style class name, as used by the theme.
    pub fn class(&self) -> &'static str {
        match self {
            Badge::Ok => "status-ok",
            Badge::Warning => "status-warning",
            Badge::Danger => "status-danger",
        }
    }
}

/// Badge for a log event. Unknown kinds get no badge class.
pub fn badge_for(event: &EventKind) -> Option<Badge> {
    match event {
        EventKind::Normal => Some(Badge::Ok),
        EventKind::Syn => Some(Badge::Warning),
        EventKind::Blocked => Some(Badge::Danger),
        EventKind::Other(_) => None,
    }
}

/// Neutralize characters that would be interpreted by the terminal.
///
/// Control characters (including ESC) and bidirectional overrides are
/// replaced by their `\u{..}` escape so they show up instead of acting.
pub fn sanitize(raw: &str) -> Cow<'_, str> {
    if !raw.chars().any(is_unsafe) {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        if is_unsafe(c) {
            out.extend(c.escape_unicode());
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn is_unsafe(c: char) -> bool {
    c.is_control() || matches!(c, '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}')
}

/// One rendered log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub time: String,
    pub ip: String,
    pub event: String,
    pub badge: Option<Badge>,
    pub block: RowAction,
    pub details: RowAction,
}

impl LogRow {
    fn from_entry(entry: &LogEntry) -> Self {
        Self {
            time: format_timestamp(&entry.timestamp),
            ip: sanitize(&entry.ip_address).into_owned(),
            event: sanitize(entry.event.as_str()).into_owned(),
            badge: badge_for(&entry.event),
            block: RowAction::Block(entry.ip_address.clone()),
            details: RowAction::Details(entry.id.clone()),
        }
    }
}

/// One rendered threat row. Alerts always carry the danger badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatRow {
    pub time: String,
    pub ip: String,
    pub alert_type: String,
    pub badge: Badge,
    pub block: RowAction,
    pub resolve: RowAction,
}

impl ThreatRow {
    fn from_alert(alert: &ThreatAlert) -> Self {
        Self {
            time: format_timestamp(&alert.timestamp),
            ip: sanitize(&alert.ip_address).into_owned(),
            alert_type: sanitize(&alert.alert_type).into_owned(),
            badge: Badge::Danger,
            block: RowAction::Block(alert.ip_address.clone()),
            resolve: RowAction::Resolve(alert.id.clone()),
        }
    }
}

/// Rows currently displayed in the log view.
#[derive(Debug, Clone, Default)]
pub struct LogTable {
    pub rows: Vec<LogRow>,
}

impl LogTable {
    /// Replace every row with the given (already filtered) entries.
    pub fn replace(&mut self, entries: &[&LogEntry]) {
        self.rows = entries.iter().map(|e| LogRow::from_entry(e)).collect();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows currently displayed in the threat view, plus the visible count.
#[derive(Debug, Clone, Default)]
pub struct ThreatTable {
    pub rows: Vec<ThreatRow>,
    pub count: usize,
}

impl ThreatTable {
    /// Replace every row with the given (already filtered) alerts.
    pub fn replace(&mut self, alerts: &[&ThreatAlert]) {
        self.rows = alerts.iter().map(|a| ThreatRow::from_alert(a)).collect();
        self.count = self.rows.len();
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn log(id: &str, ip: &str, event: &str) -> LogEntry {
        LogEntry {
            id: id.to_string(),
            timestamp: Utc::now(),
            ip_address: ip.to_string(),
            event: EventKind::from(event),
        }
    }

    #[test]
    fn test_badge_mapping() {
        assert_eq!(badge_for(&EventKind::Normal), Some(Badge::Ok));
        assert_eq!(badge_for(&EventKind::Syn), Some(Badge::Warning));
        assert_eq!(badge_for(&EventKind::Blocked), Some(Badge::Danger));
        assert_eq!(badge_for(&EventKind::from("FIN")), None);
        assert_eq!(badge_for(&EventKind::from("syn")), Some(Badge::Warning));
    }

    #[test]
    fn test_log_table_replaces_rows() {
        let first = vec![log("1", "10.0.0.1", "SYN"), log("2", "10.0.0.2", "NORMAL")];
        let second = vec![log("3", "10.0.0.3", "BLOCKED")];

        let mut table = LogTable::default();
        table.replace(&first.iter().collect::<Vec<_>>());
        assert_eq!(table.len(), 2);

        table.replace(&second.iter().collect::<Vec<_>>());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].ip, "10.0.0.3");
        assert_eq!(table.rows[0].badge, Some(Badge::Danger));
        assert_eq!(table.rows[0].block, RowAction::Block("10.0.0.3".into()));
        assert_eq!(table.rows[0].details, RowAction::Details("3".into()));
    }

    #[test]
    fn test_threat_rows_are_always_danger_and_counted() {
        let alerts = vec![
            ThreatAlert {
                id: "9".into(),
                timestamp: Utc::now(),
                ip_address: "10.0.0.9".into(),
                alert_type: "SYN Flood".into(),
                description: None,
            },
            ThreatAlert {
                id: "10".into(),
                timestamp: Utc::now(),
                ip_address: "10.0.0.10".into(),
                alert_type: "Whatever".into(),
                description: None,
            },
        ];
        let mut table = ThreatTable::default();
        table.replace(&alerts.iter().collect::<Vec<_>>());
        assert_eq!(table.count, 2);
        assert!(table.rows.iter().all(|r| r.badge == Badge::Danger));
        assert_eq!(table.rows[1].resolve, RowAction::Resolve("10".into()));

        table.replace(&[]);
        assert_eq!(table.count, 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_sanitize_escapes_terminal_sequences() {
        assert!(matches!(sanitize("10.0.0.1"), Cow::Borrowed(_)));

        let hostile = "10.0.0.1\u{1b}[2J\u{202E}";
        let clean = sanitize(hostile);
        assert!(!clean.contains('\u{1b}'));
        assert!(!clean.contains('\u{202E}'));
        assert!(clean.contains("\\u{1b}"));
        assert!(clean.contains("\\u{202e}"));
    }

    #[test]
    fn test_rows_sanitize_but_actions_keep_raw_values() {
        let entry = log("1'\u{7}", "10.0.0.1\n", "SYN");
        let mut table = LogTable::default();
        table.replace(&[&entry]);
        assert_eq!(table.rows[0].ip, "10.0.0.1\\u{a}");
        assert_eq!(table.rows[0].block, RowAction::Block("10.0.0.1\n".into()));
    }
}
