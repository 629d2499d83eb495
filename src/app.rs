//! Application state and navigation logic.
//!
//! [`App`] owns everything on screen: the last good result set of every feed,
//! the tables and chart rebuilt from them, filters, notices, modals and the
//! refresh scheduler. It is mutated only from the UI loop; network work goes
//! through the [`Dispatcher`] and comes back as [`Completion`]s.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;

use crate::actions::{ActionHandler, RowAction};
use crate::data::{
    filter_logs, filter_threats, is_valid_ip, ChartData, ChartStyle, DashboardStats, EventKind,
    FilterState, LogEntry, LogTable, ThreatAlert, ThreatTable,
};
use crate::error::ConsoleError;
use crate::notify::{Notifications, DEFAULT_NOTICE_TTL};
use crate::source::Backend;
use crate::sync::{BackoffPolicy, Completion, Dispatcher, Feed, FeedPayload, PollingScheduler};
use crate::ui::Theme;

/// Alert shown when an address fails validation.
pub const INVALID_IP_MESSAGE: &str = "Please enter a valid IP address";

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Traffic chart, dashboard stats and time range.
    Traffic,
    /// Connection log table.
    Logs,
    /// Threat alert table.
    Threats,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Traffic => View::Logs,
            View::Logs => View::Threats,
            View::Threats => View::Traffic,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Traffic => View::Threats,
            View::Logs => View::Traffic,
            View::Threats => View::Logs,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Traffic => "Traffic",
            View::Logs => "Logs",
            View::Threats => "Threats",
        }
    }

    /// Feeds refreshed by the manual refresh key on this view.
    pub fn feeds(&self) -> &'static [Feed] {
        match self {
            View::Traffic => &[Feed::Traffic, Feed::Stats],
            View::Logs => &[Feed::Logs],
            View::Threats => &[Feed::Threats],
        }
    }
}

/// Granularity selected for the traffic chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    Live,
    Hour,
    Day,
    Week,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [TimeRange::Live, TimeRange::Hour, TimeRange::Day, TimeRange::Week];

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Live => "Live",
            TimeRange::Hour => "1H",
            TimeRange::Day => "24H",
            TimeRange::Week => "7D",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimeRange::Live => TimeRange::Hour,
            TimeRange::Hour => TimeRange::Day,
            TimeRange::Day => TimeRange::Week,
            TimeRange::Week => TimeRange::Live,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TimeRange::Live => TimeRange::Week,
            TimeRange::Hour => TimeRange::Live,
            TimeRange::Day => TimeRange::Hour,
            TimeRange::Week => TimeRange::Day,
        }
    }
}

/// Which text field, if any, is capturing keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Editing the IP address used by the submit controls.
    Address,
    /// Editing the log table's IP substring filter.
    IpFilter,
}

/// A modal that captures the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Blocking alert; any key dismisses it.
    Alert(String),
    /// y/n confirmation before blocking `ip`.
    ConfirmBlock(String),
}

impl Modal {
    pub fn message(&self) -> String {
        match self {
            Modal::Alert(message) => message.clone(),
            Modal::ConfirmBlock(ip) => format!("Are you sure you want to block IP {}?", ip),
        }
    }
}

/// Runtime knobs for the console, usually built from the settings file.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub interval: Duration,
    pub backoff: BackoffPolicy,
    pub stats: bool,
    pub notice_ttl: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            backoff: BackoffPolicy::default(),
            stats: true,
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub modal: Option<Modal>,
    /// Id of the log entry shown in the detail overlay.
    pub detail: Option<String>,
    pub input_mode: InputMode,

    dispatcher: Dispatcher,
    scheduler: PollingScheduler,

    // Last good result sets
    pub logs: Vec<LogEntry>,
    pub threats: Vec<ThreatAlert>,
    pub stats: Option<DashboardStats>,
    pub last_updated: [Option<Instant>; 4],

    // Rendered state
    pub log_table: LogTable,
    pub threat_table: ThreatTable,
    pub chart: ChartData,
    pub notifications: Notifications,

    // Controls
    pub address: String,
    pub filters: FilterState,
    pub time_range: TimeRange,
    pub selected_log: usize,
    pub selected_threat: usize,

    // UI
    pub theme: Theme,
}

impl App {
    /// Create an app whose requests run on `runtime` against `backend`.
    ///
    /// Nothing is fetched until the first [`tick`](Self::tick); every enabled
    /// feed is due then.
    pub fn new(backend: Arc<dyn Backend>, runtime: Handle, options: AppOptions) -> Self {
        let feeds: Vec<Feed> =
            Feed::ALL.into_iter().filter(|f| *f != Feed::Stats || options.stats).collect();

        Self {
            running: true,
            current_view: View::Traffic,
            show_help: false,
            modal: None,
            detail: None,
            input_mode: InputMode::Normal,
            dispatcher: Dispatcher::new(backend, runtime),
            scheduler: PollingScheduler::new(
                options.interval,
                options.backoff,
                &feeds,
                Instant::now(),
            ),
            logs: Vec::new(),
            threats: Vec::new(),
            stats: None,
            last_updated: [None; 4],
            log_table: LogTable::default(),
            threat_table: ThreatTable::default(),
            chart: ChartData::new(ChartStyle::default()),
            notifications: Notifications::new(options.notice_ttl),
            address: String::new(),
            filters: FilterState::default(),
            time_range: TimeRange::default(),
            selected_log: 0,
            selected_threat: 0,
            theme: Theme::dark(),
        }
    }

    /// Replace the theme (e.g. with [`Theme::auto_detect`]).
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns a description of the current backend.
    pub fn source_description(&self) -> &str {
        self.dispatcher.description()
    }

    pub fn stats_enabled(&self) -> bool {
        self.scheduler.is_enabled(Feed::Stats)
    }

    pub fn refresh_interval(&self) -> Duration {
        self.scheduler.interval()
    }

    /// Time since `feed` last applied a response.
    pub fn since_update(&self, feed: Feed) -> Option<Duration> {
        self.last_updated[feed.index()].map(|at| at.elapsed())
    }

    // ----- refresh pipeline -----

    /// Expire notices and start the fetches whose timer fired.
    pub fn tick(&mut self, now: Instant) {
        self.notifications.prune(now);
        for feed in self.scheduler.due(now) {
            tracing::debug!(%feed, "timer refresh");
            self.fetch(feed);
        }
    }

    /// Start an immediate fetch of each of `feeds`, outside the timer cadence.
    pub fn refresh(&mut self, feeds: &[Feed]) {
        for feed in feeds {
            self.fetch(*feed);
        }
    }

    /// Refresh every feed and tell the operator.
    pub fn refresh_all(&mut self) {
        self.refresh(&Feed::ALL);
        self.notifications.success("Data refreshed");
    }

    fn fetch(&mut self, feed: Feed) {
        if !self.scheduler.is_enabled(feed) {
            return;
        }
        let seq = self.scheduler.issue(feed);
        self.dispatcher.fetch(feed, seq);
    }

    /// Apply every completion that is already available. Returns how many
    /// were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(completion) = self.dispatcher.try_next() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Wait for one completion and apply it. Pends while nothing is in flight.
    pub async fn pump_next(&mut self) {
        if let Some(completion) = self.dispatcher.next().await {
            self.apply(completion);
        }
    }

    /// Fold one request outcome into the view.
    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Fetched { feed, seq, result } => {
                if !self.scheduler.is_current(feed, seq) {
                    tracing::debug!(%feed, seq, "dropping stale response");
                    return;
                }
                let now = Instant::now();
                match result {
                    Ok(payload) => {
                        self.scheduler.mark_applied(feed, seq);
                        self.scheduler.record_success(feed, now);
                        self.last_updated[feed.index()] = Some(now);
                        self.apply_payload(payload);
                    }
                    Err(e) => {
                        let failures = self.scheduler.record_failure(feed, now);
                        tracing::warn!(%feed, seq, failures, error = %e, "fetch failed, keeping last good data");
                    }
                }
            }
            Completion::Submitted { ip, kind, result } => match result {
                Ok(()) => {
                    tracing::info!(%ip, event = %kind, "event logged");
                    self.notifications.success(format!("{} event logged for {}", kind, ip));
                    self.refresh(&Feed::AFTER_SUBMIT);
                }
                Err(e) => {
                    tracing::error!(%ip, event = %kind, error = %e, "event submission failed");
                    self.notifications.error("Error logging event");
                }
            },
        }
    }

    fn apply_payload(&mut self, payload: FeedPayload) {
        match payload {
            FeedPayload::Traffic(points) => self.chart.bind(&points),
            FeedPayload::Logs(logs) => {
                self.logs = logs;
                self.rerender_logs();
            }
            FeedPayload::Threats(threats) => {
                self.threats = threats;
                self.rerender_threats();
            }
            FeedPayload::Stats(stats) => self.stats = Some(stats),
        }
    }

    fn rerender_logs(&mut self) {
        let visible = filter_logs(&self.logs, &self.filters.event, &self.filters.ip);
        self.log_table.replace(&visible);
        self.selected_log = self.selected_log.min(self.log_table.len().saturating_sub(1));
    }

    fn rerender_threats(&mut self) {
        let visible = filter_threats(&self.threats, &self.filters.threat);
        self.threat_table.replace(&visible);
        self.selected_threat = self.selected_threat.min(self.threat_table.count.saturating_sub(1));
    }

    // ----- submissions -----

    /// Send a synthetic event for `ip`.
    ///
    /// An address that fails validation opens the alert modal and sends
    /// nothing. Otherwise the request is dispatched and its outcome arrives
    /// later as a [`Completion::Submitted`].
    pub fn submit_event(&mut self, ip: &str, kind: EventKind) -> Result<(), ConsoleError> {
        if !is_valid_ip(ip) {
            self.modal = Some(Modal::Alert(INVALID_IP_MESSAGE.to_string()));
            return Err(ConsoleError::InvalidIp(ip.to_string()));
        }
        tracing::info!(ip, event = %kind, "submitting event");
        self.dispatcher.submit(ip, kind);
        Ok(())
    }

    /// Submit the address in the input bar.
    ///
    /// Blocking from the input bar skips invalid addresses silently and needs
    /// no confirmation. The input is cleared whenever something was entered.
    pub fn submit_address(&mut self, kind: EventKind) {
        let ip = self.address.trim().to_string();
        if ip.is_empty() {
            return;
        }
        if kind == EventKind::Blocked {
            if is_valid_ip(&ip) && self.submit_event(&ip, EventKind::Blocked).is_ok() {
                self.notifications.success(format!("IP {} has been blocked", ip));
            }
        } else {
            // validation failures are already surfaced through the modal
            let _ = self.submit_event(&ip, kind);
        }
        self.address.clear();
    }

    // ----- modals -----

    /// Answer the open modal. `yes` only matters for confirmations.
    pub fn answer_modal(&mut self, yes: bool) {
        if let Some(Modal::ConfirmBlock(ip)) = self.modal.take() {
            if yes {
                let _ = self.submit_event(&ip, EventKind::Blocked);
            }
        }
    }

    // ----- row actions -----

    /// Dispatch `action` into this app.
    pub fn dispatch(&mut self, action: RowAction) {
        tracing::debug!(action = action.label(), "row action");
        action.dispatch(self);
    }

    /// Block the address of the selected row.
    pub fn block_selected(&mut self) {
        let action = match self.current_view {
            View::Logs => self.log_table.rows.get(self.selected_log).map(|r| r.block.clone()),
            View::Threats => {
                self.threat_table.rows.get(self.selected_threat).map(|r| r.block.clone())
            }
            View::Traffic => None,
        };
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    /// Open the selected log entry's details.
    pub fn details_selected(&mut self) {
        if self.current_view != View::Logs {
            return;
        }
        if let Some(row) = self.log_table.rows.get(self.selected_log) {
            let action = row.details.clone();
            self.dispatch(action);
        }
    }

    /// Resolve the selected threat.
    pub fn resolve_selected(&mut self) {
        if self.current_view != View::Threats {
            return;
        }
        if let Some(row) = self.threat_table.rows.get(self.selected_threat) {
            let action = row.resolve.clone();
            self.dispatch(action);
        }
    }

    /// The log entry shown in the detail overlay, from the last good set.
    pub fn detail_entry(&self) -> Option<&LogEntry> {
        let id = self.detail.as_ref()?;
        self.logs.iter().find(|l| &l.id == id)
    }

    // ----- filters -----

    /// Cycle the filter of the current view.
    pub fn cycle_filter(&mut self) {
        match self.current_view {
            View::Logs => {
                self.filters.event = self.filters.event.next();
                self.on_log_filter_changed();
            }
            View::Threats => {
                let options = self.threat_types();
                self.filters.threat = self.filters.threat.next(&options);
                self.rerender_threats();
                self.refresh(&[Feed::Threats]);
            }
            View::Traffic => {}
        }
    }

    /// Distinct alert types in the last good threat set, sorted.
    pub fn threat_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.threats.iter().map(|t| t.alert_type.clone()).collect();
        types.sort();
        types.dedup();
        types
    }

    /// Enter IP filter input mode.
    pub fn start_ip_filter(&mut self) {
        if self.current_view == View::Logs {
            self.input_mode = InputMode::IpFilter;
        }
    }

    pub fn ip_filter_push(&mut self, c: char) {
        self.filters.ip.push(c);
        self.on_log_filter_changed();
    }

    pub fn ip_filter_pop(&mut self) {
        if self.filters.ip.pop().is_some() {
            self.on_log_filter_changed();
        }
    }

    /// Clear the IP filter and exit filter mode.
    pub fn clear_ip_filter(&mut self) {
        self.input_mode = InputMode::Normal;
        if !self.filters.ip.is_empty() {
            self.filters.ip.clear();
            self.on_log_filter_changed();
        }
    }

    fn on_log_filter_changed(&mut self) {
        self.rerender_logs();
        self.refresh(&[Feed::Logs]);
    }

    // ----- time range -----

    pub fn set_time_range(&mut self, range: TimeRange) {
        self.time_range = range;
        self.refresh(&[Feed::Traffic]);
    }

    pub fn next_time_range(&mut self) {
        self.set_time_range(self.time_range.next());
    }

    pub fn prev_time_range(&mut self) {
        self.set_time_range(self.time_range.prev());
    }

    // ----- navigation -----

    /// Switch to the next view (cycles through Traffic → Logs → Threats).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    fn row_count(&self) -> usize {
        match self.current_view {
            View::Logs => self.log_table.len(),
            View::Threats => self.threat_table.count,
            View::Traffic => 0,
        }
    }

    fn selection_mut(&mut self) -> Option<&mut usize> {
        match self.current_view {
            View::Logs => Some(&mut self.selected_log),
            View::Threats => Some(&mut self.selected_threat),
            View::Traffic => None,
        }
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.row_count().saturating_sub(1);
        if let Some(selected) = self.selection_mut() {
            *selected = (*selected + n).min(max);
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        if let Some(selected) = self.selection_mut() {
            *selected = selected.saturating_sub(n);
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        if let Some(selected) = self.selection_mut() {
            *selected = 0;
        }
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        let last = self.row_count().saturating_sub(1);
        if let Some(selected) = self.selection_mut() {
            *selected = last;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.detail = None;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

impl ActionHandler for App {
    fn block(&mut self, ip: &str) {
        self.modal = Some(Modal::ConfirmBlock(ip.to_string()));
    }

    fn resolve(&mut self, threat_id: &str) {
        self.notifications.success(format!("Threat {} has been resolved", threat_id));
        self.refresh(&[Feed::Threats]);
    }

    fn show_details(&mut self, log_id: &str) {
        self.detail = Some(log_id.to_string());
        self.notifications.success(format!("Showing details for log ID: {}", log_id));
    }
}
