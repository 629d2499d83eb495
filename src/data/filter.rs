//! Local filtering of fetched result sets.
//!
//! Both engines are pure: they borrow the full set, never mutate it, and keep
//! the relative order of matching items.

use super::model::{EventKind, LogEntry, ThreatAlert};

/// Event-type criterion for the log table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    Only(EventKind),
}

impl EventFilter {
    /// Cycle All → NORMAL → SYN → BLOCKED → All.
    pub fn next(&self) -> Self {
        match self {
            EventFilter::All => EventFilter::Only(EventKind::Normal),
            EventFilter::Only(EventKind::Normal) => EventFilter::Only(EventKind::Syn),
            EventFilter::Only(EventKind::Syn) => EventFilter::Only(EventKind::Blocked),
            EventFilter::Only(_) => EventFilter::All,
        }
    }

    pub fn matches(&self, event: &EventKind) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Only(kind) => kind == event,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EventFilter::All => "all",
            EventFilter::Only(kind) => kind.as_str(),
        }
    }
}

/// Alert-type criterion for the threat table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    pub fn matches(&self, alert_type: &str) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => wanted == alert_type,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Only(wanted) => wanted,
        }
    }

    /// Step to the option after the current one, wrapping back to `All`.
    ///
    /// If the current value is no longer among `options` the cycle restarts
    /// from the first option.
    pub fn next(&self, options: &[String]) -> Self {
        let position = match self {
            TypeFilter::All => None,
            TypeFilter::Only(current) => options.iter().position(|o| o == current),
        };
        let next = match (self, position) {
            (TypeFilter::All, _) | (_, None) => options.first(),
            (_, Some(i)) => options.get(i + 1),
        };
        next.map_or(TypeFilter::All, |o| TypeFilter::Only(o.clone()))
    }
}

/// Ephemeral filter criteria held by the controls currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub event: EventFilter,
    pub ip: String,
    pub threat: TypeFilter,
}

/// Reduce `all` to the logs matching the event criterion and IP substring.
///
/// The IP criterion is trimmed and matched case-insensitively; an empty
/// criterion matches everything.
pub fn filter_logs<'a>(
    all: &'a [LogEntry],
    event: &EventFilter,
    ip_substring: &str,
) -> Vec<&'a LogEntry> {
    let needle = ip_substring.trim().to_lowercase();
    all.iter()
        .filter(|log| event.matches(&log.event))
        .filter(|log| needle.is_empty() || log.ip_address.to_lowercase().contains(&needle))
        .collect()
}

/// Reduce `all` to the alerts whose type matches the criterion.
pub fn filter_threats<'a>(all: &'a [ThreatAlert], alert_type: &TypeFilter) -> Vec<&'a ThreatAlert> {
    all.iter().filter(|alert| alert_type.matches(&alert.alert_type)).collect()
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

    fn threat(id: &str, alert_type: &str) -> ThreatAlert {
        ThreatAlert {
            id: id.to_string(),
            timestamp: Utc::now(),
            ip_address: "10.0.0.1".to_string(),
            alert_type: alert_type.to_string(),
            description: None,
        }
    }

    fn sample_logs() -> Vec<LogEntry> {
        vec![
            log("1", "10.0.0.1", "SYN"),
            log("2", "192.168.1.5", "NORMAL"),
            log("3", "10.0.3.7", "SYN"),
            log("4", "172.16.10.0", "BLOCKED"),
            log("5", "10.0.0.9", "NORMAL"),
        ]
    }

    fn log_ids(items: &[&LogEntry]) -> Vec<String> {
        items.iter().map(|l| l.id.clone()).collect()
    }

    fn threat_ids(items: &[&ThreatAlert]) -> Vec<String> {
        items.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_filter_by_event_keeps_order() {
        let logs = sample_logs();
        let result = filter_logs(&logs, &EventFilter::Only(EventKind::Syn), "");
        assert_eq!(log_ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn test_filter_by_ip_substring() {
        let logs = sample_logs();
        let result = filter_logs(&logs, &EventFilter::All, "10.0");
        assert_eq!(log_ids(&result), vec!["1", "3", "4", "5"]);
    }

    #[test]
    fn test_ip_substring_is_case_insensitive_and_trimmed() {
        let logs = vec![log("1", "FE80::1", "NORMAL"), log("2", "10.0.0.1", "NORMAL")];
        let result = filter_logs(&logs, &EventFilter::All, "  fe80 ");
        assert_eq!(log_ids(&result), vec!["1"]);
    }

    #[test]
    fn test_filters_combine() {
        let logs = sample_logs();
        let result = filter_logs(&logs, &EventFilter::Only(EventKind::Normal), "10.0");
        assert_eq!(log_ids(&result), vec!["5"]);
    }

    #[test]
    fn test_all_and_empty_returns_everything() {
        let logs = sample_logs();
        assert_eq!(filter_logs(&logs, &EventFilter::All, "").len(), logs.len());
        assert!(filter_logs(&[], &EventFilter::All, "").is_empty());
    }

    #[test]
    fn test_unrecognized_event_only_matches_all() {
        let logs = vec![log("1", "10.0.0.1", "RST")];
        assert_eq!(filter_logs(&logs, &EventFilter::All, "").len(), 1);
        for kind in EventKind::SUBMITTABLE {
            assert!(filter_logs(&logs, &EventFilter::Only(kind), "").is_empty());
        }
    }

    #[test]
    fn test_filter_threats_by_type() {
        let threats = vec![threat("a", "SYN Flood"), threat("b", "IP Blocked"), threat("c", "SYN Flood")];
        let flood = filter_threats(&threats, &TypeFilter::Only("SYN Flood".to_string()));
        assert_eq!(threat_ids(&flood), vec!["a", "c"]);
        assert_eq!(filter_threats(&threats, &TypeFilter::All).len(), 3);
        assert!(filter_threats(&threats, &TypeFilter::Only("syn flood".to_string())).is_empty());
    }

    #[test]
    fn test_event_filter_cycle() {
        let mut filter = EventFilter::All;
        let mut seen = Vec::new();
        for _ in 0..4 {
            filter = filter.next();
            seen.push(filter.label().to_string());
        }
        assert_eq!(seen, vec!["NORMAL", "SYN", "BLOCKED", "all"]);
    }

    #[test]
    fn test_type_filter_cycle() {
        let options = vec!["IP Blocked".to_string(), "SYN Flood".to_string()];
        let first = TypeFilter::All.next(&options);
        assert_eq!(first, TypeFilter::Only("IP Blocked".to_string()));
        let second = first.next(&options);
        assert_eq!(second, TypeFilter::Only("SYN Flood".to_string()));
        assert_eq!(second.next(&options), TypeFilter::All);

        let stale = TypeFilter::Only("Port Scan".to_string());
        assert_eq!(stale.next(&options), TypeFilter::Only("IP Blocked".to_string()));
        assert_eq!(TypeFilter::All.next(&[]), TypeFilter::All);
    }
}
