//! Refresh timing and response ordering for the polled feeds.
//!
//! Each feed has its own clock: a next-due instant for the timer cadence, a
//! consecutive-failure counter driving backoff, and a pair of sequence
//! numbers (last issued, last applied) used to drop responses that arrive
//! after a newer one was already shown.
//!
//! On-demand refreshes only consume a sequence number; they never move the
//! timer.

use std::time::{Duration, Instant};

use super::Feed;

/// Largest exponent applied to the base interval.
const MAX_BACKOFF_EXPONENT: u32 = 16;

/// How the timer reacts to consecutive fetch failures.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    /// When false the cadence stays fixed regardless of failures.
    pub enabled: bool,
    /// Upper bound for the delay before jitter.
    pub max_delay: Duration,
    /// Random extra delay, as a fraction (0..=1) of the computed delay.
    pub jitter: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_delay: Duration::from_secs(60),
            jitter: 0.1,
        }
    }
}

impl BackoffPolicy {
    /// Fixed cadence, no backoff.
    pub fn fixed() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Delay before the next timer-driven fetch after `failures` consecutive
    /// failures, without jitter.
    pub fn base_delay(&self, interval: Duration, failures: u32) -> Duration {
        if !self.enabled || failures == 0 {
            return interval;
        }
        let factor = 1u32 << failures.min(MAX_BACKOFF_EXPONENT);
        interval.saturating_mul(factor).min(self.max_delay.max(interval))
    }

    /// [`base_delay`](Self::base_delay) plus random jitter.
    pub fn delay(&self, interval: Duration, failures: u32) -> Duration {
        let base = self.base_delay(interval, failures);
        if !self.enabled || failures == 0 || self.jitter <= 0.0 {
            return base;
        }
        base + base.mul_f64(self.jitter.min(1.0) * fastrand::f64())
    }
}

#[derive(Debug, Clone)]
struct FeedClock {
    enabled: bool,
    next_due: Instant,
    failures: u32,
    issued: u64,
    applied: u64,
}

/// Per-feed refresh clocks.
#[derive(Debug, Clone)]
pub struct PollingScheduler {
    interval: Duration,
    backoff: BackoffPolicy,
    clocks: [FeedClock; 4],
}

impl PollingScheduler {
    /// Create a scheduler where every feed in `enabled` is due at `now`.
    pub fn new(interval: Duration, backoff: BackoffPolicy, enabled: &[Feed], now: Instant) -> Self {
        let clock = |feed: Feed| FeedClock {
            enabled: enabled.contains(&feed),
            next_due: now,
            failures: 0,
            issued: 0,
            applied: 0,
        };
        Self {
            interval,
            backoff,
            clocks: Feed::ALL.map(clock),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self, feed: Feed) -> bool {
        self.clocks[feed.index()].enabled
    }

    /// Feeds whose timer has fired at `now`. Each returned feed is
    /// rescheduled for its next cadence.
    pub fn due(&mut self, now: Instant) -> Vec<Feed> {
        let mut due = Vec::new();
        for feed in Feed::ALL {
            let delay = {
                let clock = &self.clocks[feed.index()];
                if !clock.enabled || clock.next_due > now {
                    continue;
                }
                self.backoff.delay(self.interval, clock.failures)
            };
            self.clocks[feed.index()].next_due = now + delay;
            due.push(feed);
        }
        due
    }

    /// Allocate the sequence number for a new fetch of `feed`.
    pub fn issue(&mut self, feed: Feed) -> u64 {
        let clock = &mut self.clocks[feed.index()];
        clock.issued += 1;
        clock.issued
    }

    /// Whether a response with sequence `seq` is newer than the last payload
    /// applied for `feed`. Does not mark anything applied.
    pub fn is_current(&self, feed: Feed, seq: u64) -> bool {
        seq > self.clocks[feed.index()].applied
    }

    /// Record that the payload of fetch `seq` is now on screen. Only
    /// successful responses are applied; failures leave the watermark alone.
    pub fn mark_applied(&mut self, feed: Feed, seq: u64) {
        let clock = &mut self.clocks[feed.index()];
        clock.applied = clock.applied.max(seq);
    }

    /// A fetch of `feed` succeeded: clear backoff.
    pub fn record_success(&mut self, feed: Feed, now: Instant) {
        let interval = self.interval;
        let clock = &mut self.clocks[feed.index()];
        clock.failures = 0;
        if clock.next_due > now + interval {
            clock.next_due = now + interval;
        }
    }

    /// A fetch of `feed` failed: push its timer out according to the policy.
    /// Returns the consecutive failure count.
    pub fn record_failure(&mut self, feed: Feed, now: Instant) -> u32 {
        let failures = {
            let clock = &mut self.clocks[feed.index()];
            clock.failures = clock.failures.saturating_add(1);
            clock.failures
        };
        if self.backoff.enabled {
            let backed_off = now + self.backoff.delay(self.interval, failures);
            let clock = &mut self.clocks[feed.index()];
            if backed_off > clock.next_due {
                clock.next_due = backed_off;
            }
        }
        failures
    }

    pub fn failures(&self, feed: Feed) -> u32 {
        self.clocks[feed.index()].failures
    }

    pub fn next_due(&self, feed: Feed) -> Instant {
        self.clocks[feed.index()].next_due
    }
}
