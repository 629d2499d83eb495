//! Feed refresh machinery.
//!
//! - [`scheduler`]: decides *when* each feed is fetched (timer cadence,
//!   backoff after failures) and which responses are still current
//!   (per-feed sequence numbers).
//! - [`dispatch`]: runs requests on the async runtime and hands their
//!   outcomes back to the UI thread as [`Completion`]s.
//!
//! ```text
//!  UI loop ──tick──▶ PollingScheduler::due ──▶ Dispatcher::fetch ──spawn──▶ Backend
//!     ▲                                                                   │
//!     └──────────── Dispatcher::try_next ◀── mpsc ◀── Completion ─────────┘
//! ```

pub mod dispatch;
pub mod scheduler;

pub use dispatch::{Completion, Dispatcher, FeedPayload};
pub use scheduler::{BackoffPolicy, PollingScheduler};

use std::fmt;

/// One independently polled result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feed {
    Traffic,
    Logs,
    Threats,
    Stats,
}

impl Feed {
    /// Every feed, in refresh order.
    pub const ALL: [Feed; 4] = [Feed::Traffic, Feed::Logs, Feed::Threats, Feed::Stats];

    /// Feeds re-fetched after an accepted event submission.
    pub const AFTER_SUBMIT: [Feed; 2] = [Feed::Logs, Feed::Threats];

    pub fn label(&self) -> &'static str {
        match self {
            Feed::Traffic => "traffic",
            Feed::Logs => "logs",
            Feed::Threats => "threats",
            Feed::Stats => "stats",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Feed::Traffic => 0,
            Feed::Logs => 1,
            Feed::Threats => 2,
            Feed::Stats => 3,
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
