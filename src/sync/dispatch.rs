//! Runs backend calls off the UI thread.
//!
//! Every fetch or submission is spawned on the runtime and reports back with
//! exactly one [`Completion`] on an unbounded channel. The UI loop drains the
//! channel between frames and is the only place view state changes.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use super::Feed;
use crate::data::{DashboardStats, EventKind, LogEntry, ThreatAlert, TrafficPoint};
use crate::error::ConsoleError;
use crate::source::Backend;

/// Body of a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedPayload {
    Traffic(Vec<TrafficPoint>),
    Logs(Vec<LogEntry>),
    Threats(Vec<ThreatAlert>),
    Stats(DashboardStats),
}

impl FeedPayload {
    pub fn feed(&self) -> Feed {
        match self {
            FeedPayload::Traffic(_) => Feed::Traffic,
            FeedPayload::Logs(_) => Feed::Logs,
            FeedPayload::Threats(_) => Feed::Threats,
            FeedPayload::Stats(_) => Feed::Stats,
        }
    }
}

/// Outcome of one background request.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Fetched {
        feed: Feed,
        seq: u64,
        result: Result<FeedPayload, ConsoleError>,
    },
    Submitted {
        ip: String,
        kind: EventKind,
        result: Result<(), ConsoleError>,
    },
}

/// Spawns backend requests and collects their completions.
pub struct Dispatcher {
    backend: Arc<dyn Backend>,
    runtime: Handle,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn Backend>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            backend,
            runtime,
            tx,
            rx,
        }
    }

    pub fn description(&self) -> &str {
        self.backend.description()
    }

    /// Start fetching `feed`; the completion carries `seq`.
    pub fn fetch(&self, feed: Feed, seq: u64) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tracing::trace!(%feed, seq, "fetch issued");

        self.runtime.spawn(async move {
            let result = match feed {
                Feed::Traffic => backend.traffic().await.map(FeedPayload::Traffic),
                Feed::Logs => backend.logs().await.map(FeedPayload::Logs),
                Feed::Threats => backend.threats().await.map(FeedPayload::Threats),
                Feed::Stats => backend.stats().await.map(FeedPayload::Stats),
            };
            // receiver gone means the console is shutting down
            let _ = tx.send(Completion::Fetched { feed, seq, result });
        });
    }

    /// Start submitting a simulated event.
    pub fn submit(&self, ip: &str, kind: EventKind) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let ip = ip.to_string();

        self.runtime.spawn(async move {
            let result = backend.simulate(&ip, &kind).await;
            let _ = tx.send(Completion::Submitted { ip, kind, result });
        });
    }

    /// Next completion if one is ready.
    pub fn try_next(&mut self) -> Option<Completion> {
        match self.rx.try_recv() {
            Ok(completion) => Some(completion),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait for the next completion.
    ///
    /// The dispatcher keeps a sender of its own, so the channel never closes
    /// while it lives: with nothing in flight this pends rather than
    /// returning `None`.
    pub async fn next(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::source::DemoBackend;

    #[tokio::test]
    async fn test_fetch_reports_exactly_once() {
        let mut dispatcher =
            Dispatcher::new(Arc::new(DemoBackend::new()), Handle::current());

        dispatcher.fetch(Feed::Logs, 7);
        match dispatcher.next().await {
            Some(Completion::Fetched { feed, seq, result }) => {
                assert_eq!(feed, Feed::Logs);
                assert_eq!(seq, 7);
                assert_eq!(result, Ok(FeedPayload::Logs(Vec::new())));
            }
            other => panic!("unexpected completion: {:?}", other),
        }
        assert!(dispatcher.try_next().is_none());
    }

    #[tokio::test]
    async fn test_submit_reports_outcome() {
        let mut dispatcher =
            Dispatcher::new(Arc::new(DemoBackend::new()), Handle::current());

        dispatcher.submit("10.0.0.1", EventKind::Syn);
        match dispatcher.next().await {
            Some(Completion::Submitted { ip, kind, result }) => {
                assert_eq!(ip, "10.0.0.1");
                assert_eq!(kind, EventKind::Syn);
                assert!(result.is_ok());
            }
            other => panic!("unexpected completion: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_next_pends_when_idle() {
        let mut dispatcher =
            Dispatcher::new(Arc::new(DemoBackend::new()), Handle::current());

        dispatcher.fetch(Feed::Threats, 1);
        assert!(dispatcher.next().await.is_some());

        // every request has reported; the channel stays open
        let idle = tokio::time::timeout(Duration::from_millis(50), dispatcher.next()).await;
        assert!(idle.is_err());
    }

    #[test]
    fn test_payload_feed() {
        assert_eq!(FeedPayload::Stats(DashboardStats::default()).feed(), Feed::Stats);
        assert_eq!(FeedPayload::Traffic(Vec::new()).feed(), Feed::Traffic);
    }
}
