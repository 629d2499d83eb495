//! Row actions and the handler they are dispatched into.
//!
//! Rendered rows carry [`RowAction`] values instead of referring to any
//! global entry point. Whoever owns the console state implements
//! [`ActionHandler`] and is passed in at dispatch time, so the same row can be
//! driven by the TUI key handler or by a test.

/// An action attached to a rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Block the given address (confirmation is the handler's concern).
    Block(String),
    /// Show the details of the log entry with this id.
    Details(String),
    /// Mark the threat with this id as resolved.
    Resolve(String),
}

impl RowAction {
    /// Short label used in key hints.
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Block(_) => "block",
            RowAction::Details(_) => "details",
            RowAction::Resolve(_) => "resolve",
        }
    }

    /// Invoke this action on `handler`.
    pub fn dispatch(&self, handler: &mut dyn ActionHandler) {
        match self {
            RowAction::Block(ip) => handler.block(ip),
            RowAction::Details(id) => handler.show_details(id),
            RowAction::Resolve(id) => handler.resolve(id),
        }
    }
}

/// Receiver of row actions.
pub trait ActionHandler {
    /// Ask for confirmation, then submit a BLOCKED event for `ip`.
    fn block(&mut self, ip: &str);

    /// Acknowledge a threat and refresh the threat feed.
    fn resolve(&mut self, threat_id: &str);

    /// Show the details of a log entry.
    fn show_details(&mut self, log_id: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl ActionHandler for Recorder {
        fn block(&mut self, ip: &str) {
            self.calls.push(format!("block {ip}"));
        }

        fn resolve(&mut self, threat_id: &str) {
            self.calls.push(format!("resolve {threat_id}"));
        }

        fn show_details(&mut self, log_id: &str) {
            self.calls.push(format!("details {log_id}"));
        }
    }

    #[test]
    fn test_dispatch_routes_to_handler() {
        let mut recorder = Recorder::default();
        RowAction::Block("10.0.0.1".into()).dispatch(&mut recorder);
        RowAction::Resolve("7".into()).dispatch(&mut recorder);
        RowAction::Details("12".into()).dispatch(&mut recorder);
        assert_eq!(recorder.calls, vec!["block 10.0.0.1", "resolve 7", "details 12"]);
    }
}
