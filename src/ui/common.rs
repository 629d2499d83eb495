//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, address bar, status bar,
//! notices, modals and the help overlay.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, InputMode, Modal, View};
use crate::data::duration::format_duration;
use crate::data::sanitize;
use crate::sync::Feed;

/// Width of a notice toast.
const NOTICE_WIDTH: u16 = 44;

/// Render the header bar with the dashboard stats.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled(" FIREWALL CONSOLE ", Style::default().add_modifier(Modifier::BOLD));

    let line = match (app.stats_enabled(), app.stats) {
        (false, _) => Line::from(vec![title, Span::raw("│ "), Span::raw(app.source_description())]),
        (true, None) => Line::from(vec![title, Span::raw("│ Loading...")]),
        (true, Some(stats)) => {
            let threats_style = if stats.active_threats > 0 {
                Style::default().fg(app.theme.danger).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            Line::from(vec![
                title,
                Span::raw("│ "),
                Span::styled(
                    format_count(stats.total_traffic),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" events │ "),
                Span::styled(format_count(stats.active_threats), threats_style),
                Span::raw(" threats │ "),
                Span::styled(
                    format_count(stats.blocked_ips),
                    Style::default().fg(app.theme.warning),
                ),
                Span::raw(" blocked │ "),
                Span::raw(format_count(stats.recent_activity)),
                Span::raw(" last hour"),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Format a count for display (e.g., 1234 -> "1.2K", 1234567 -> "1.2M").
fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Render the tab bar showing available views.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Traffic "),
        Line::from(format!(" 2:Logs ({}) ", app.log_table.len())),
        Line::from(format!(" 3:Threats ({}) ", app.threat_table.count)),
    ];

    let selected = match app.current_view {
        View::Traffic => 0,
        View::Logs => 1,
        View::Threats => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the address bar with its submit controls.
pub fn render_address_bar(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Address;
    let text = if editing {
        format!("{}_", sanitize(&app.address))
    } else if app.address.is_empty() {
        String::new()
    } else {
        sanitize(&app.address).into_owned()
    };

    let border = if editing {
        Style::default().fg(app.theme.highlight)
    } else {
        Style::default().fg(app.theme.border)
    };

    let block = Block::default()
        .title(" IP address [i:edit] ")
        .title_bottom(Line::from(" n:NORMAL  s:SYN  x:block ").alignment(Alignment::Right))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Render the status bar at the bottom.
///
/// Shows: backend, time since the visible feed last updated, available
/// controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let controls = match (app.input_mode, app.current_view) {
        (InputMode::Address, _) => "Type an IPv4 address | Enter/Esc:done",
        (InputMode::IpFilter, _) => "Type to filter by IP | Enter:apply Esc:done Ctrl-u:clear",
        (InputMode::Normal, View::Traffic) => "[/]:range r:refresh R:all Tab:switch ?:help q:quit",
        (InputMode::Normal, View::Logs) => {
            "f:event /:ip b:block Enter:details r:refresh ?:help q:quit"
        }
        (InputMode::Normal, View::Threats) => {
            "f:type b:block v:resolve r:refresh ?:help q:quit"
        }
    };

    let feed = match app.current_view {
        View::Traffic => Feed::Traffic,
        View::Logs => Feed::Logs,
        View::Threats => Feed::Threats,
    };
    let updated = match app.since_update(feed) {
        Some(elapsed) => format!("Updated {:.1}s ago", elapsed.as_secs_f64()),
        None => "Loading...".to_string(),
    };

    let status = format!(
        " {} | every {} | {} | {}",
        app.source_description(),
        format_duration(app.refresh_interval()),
        updated,
        controls
    );
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render live notices stacked in the top-right corner, newest at the bottom.
pub fn render_notices(frame: &mut Frame, app: &App, area: Rect) {
    let width = NOTICE_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width);
    let mut y = area.y;

    for notice in app.notifications.visible(Instant::now()) {
        if y >= area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, 1);
        let text = format!(" {} ", sanitize(&notice.message));
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(text).style(app.theme.notice_style(notice.severity)),
            rect,
        );
        y += 1;
    }
}

/// Render the open modal, if any, centered on screen.
pub fn render_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref modal) = app.modal else {
        return;
    };

    let (title, hint, border) = match modal {
        Modal::Alert(_) => (" Alert ", "Press any key", app.theme.danger),
        Modal::ConfirmBlock(_) => (" Confirm ", "y:yes  n:no", app.theme.warning),
    };

    let lines = vec![
        Line::from(""),
        Line::from(sanitize(&modal.message()).into_owned()),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().add_modifier(Modifier::DIM))),
    ];

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(border));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

    let width = 50u16.min(area.width.saturating_sub(4));
    let height = 7u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let modal_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, modal_area);
    frame.render_widget(paragraph, modal_area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |name: &'static str| {
        Line::from(vec![Span::styled(name, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l 1-3 Switch views"),
        Line::from("  ↑/↓ j/k     Navigate rows"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        section(" Events"),
        Line::from("  i           Edit IP address"),
        Line::from("  n / s       Send NORMAL / SYN"),
        Line::from("  x           Block the entered IP"),
        Line::from(""),
        section(" Rows"),
        Line::from("  b           Block row IP"),
        Line::from("  Enter       Log details"),
        Line::from("  v           Resolve threat"),
        Line::from("  f           Cycle event/type filter"),
        Line::from("  /  c        Filter by IP / clear"),
        Line::from(""),
        section(" General"),
        Line::from("  [ ]         Traffic time range"),
        Line::from("  r / R       Refresh view / all"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 30u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
