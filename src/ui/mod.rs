//! Terminal rendering.
//!
//! [`draw`] lays out one frame: header, tabs, address bar, the current view
//! and the status bar, then the overlays (detail, modal, help) and the notice
//! stack on top.

pub mod common;
pub mod detail;
pub mod logs;
pub mod theme;
pub mod threats;
pub mod traffic;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

/// Minimum terminal size for usable display
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 16;

/// Row where view content begins (header, tabs, 3-line address bar).
pub const CONTENT_START_ROW: u16 = 5;

/// Render one frame of the console.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5.min(area.height));
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Length(3), // Address bar
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);
    common::render_address_bar(frame, app, chunks[2]);

    match app.current_view {
        View::Traffic => traffic::render(frame, app, chunks[3]),
        View::Logs => logs::render(frame, app, chunks[3]),
        View::Threats => threats::render(frame, app, chunks[3]),
    }

    common::render_status_bar(frame, app, chunks[4]);

    if app.detail.is_some() {
        detail::render_overlay(frame, app, area);
    }

    if app.show_help {
        common::render_help(frame, app, area);
    }

    common::render_modal(frame, app, area);
    common::render_notices(frame, app, area);
}
