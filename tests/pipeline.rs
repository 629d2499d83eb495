//! End-to-end: operator input through the dispatcher into the demo backend
//! and back into the tables.

use std::sync::Arc;
use std::time::Duration;

use firewall_console::app::Modal;
use firewall_console::data::{EventFilter, FilterState};
use firewall_console::notify::Severity;
use firewall_console::{App, AppOptions, DemoBackend, EventKind, Feed, RowAction};
use tokio::runtime::Handle;
use tokio::time::timeout;

fn demo_app() -> App {
    App::new(Arc::new(DemoBackend::new()), Handle::current(), AppOptions::default())
}

/// Pump completions until `done` holds.
async fn pump_until(app: &mut App, done: impl Fn(&App) -> bool) {
    timeout(Duration::from_secs(5), async {
        while !done(app) {
            app.pump_next().await;
        }
    })
    .await
    .expect("timed out waiting for completions");
}

#[tokio::test]
async fn test_syn_burst_raises_threat() {
    let mut app = demo_app();

    for _ in 0..5 {
        app.submit_event("203.0.113.7", EventKind::Syn).unwrap();
    }

    pump_until(&mut app, |app| !app.threat_table.is_empty() && app.log_table.len() == 5).await;

    let row = &app.threat_table.rows[0];
    assert_eq!(row.alert_type, "SYN Flood");
    assert_eq!(row.ip, "203.0.113.7");
    assert_eq!(app.notifications.count(Severity::Success), 5);
    assert_eq!(app.notifications.count(Severity::Error), 0);
}

#[tokio::test]
async fn test_block_from_threat_row() {
    let mut app = demo_app();

    app.submit_event("198.51.100.4", EventKind::Normal).unwrap();
    pump_until(&mut app, |app| app.log_table.len() == 1).await;

    app.dispatch(RowAction::Block("198.51.100.4".into()));
    assert_eq!(app.modal, Some(Modal::ConfirmBlock("198.51.100.4".into())));

    app.answer_modal(true);
    assert!(app.modal.is_none());
    pump_until(&mut app, |app| app.logs.iter().any(|l| l.event == EventKind::Blocked)).await;

    let blocked: Vec<_> = app.logs.iter().filter(|l| l.event == EventKind::Blocked).collect();
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].ip_address, "198.51.100.4");
}

#[tokio::test]
async fn test_invalid_address_never_reaches_backend() {
    let mut app = demo_app();

    app.address = "999.1.1.1".into();
    app.submit_address(EventKind::Syn);

    assert!(matches!(app.modal, Some(Modal::Alert(_))));
    assert!(app.address.is_empty());
    assert_eq!(app.pump(), 0);
}

#[tokio::test]
async fn test_filters_apply_to_refreshed_rows() {
    let mut app = demo_app();

    app.submit_event("10.0.0.1", EventKind::Syn).unwrap();
    app.submit_event("10.0.0.2", EventKind::Normal).unwrap();
    pump_until(&mut app, |app| app.log_table.len() == 2).await;

    app.filters = FilterState {
        event: EventFilter::Only(EventKind::Normal),
        ..FilterState::default()
    };
    app.refresh(&[Feed::Logs]);
    pump_until(&mut app, |app| app.log_table.len() == 1).await;

    assert_eq!(app.log_table.rows[0].ip, "10.0.0.2");
}
