//! Detail overlay rendering.
//!
//! Displays a modal overlay with the fields of the selected log entry, plus
//! the threats recorded against the same address.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::model::format_timestamp;
use crate::data::{badge_for, sanitize};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Render the log detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(ref id) = app.detail else {
        return;
    };

    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    let overlay_height = (area.height * 70 / 100).clamp(MIN_OVERLAY_HEIGHT, 30);
    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let header_block = Block::default()
        .title(format!(" Log {} ", sanitize(id)))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    // The entry may have dropped out of the feed since the overlay opened
    let Some(entry) = app.detail_entry() else {
        let gone = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Entry is no longer in the latest logs",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(header_block);
        frame.render_widget(gone, overlay_area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(6), // Entry fields
        Constraint::Min(4),    // Related threats
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    let badge = badge_for(&entry.event);
    let header_lines = vec![
        Line::from(vec![
            Span::raw(" Time:    "),
            Span::styled(
                format_timestamp(&entry.timestamp),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Address: "),
            Span::styled(
                sanitize(&entry.ip_address).into_owned(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Event:   "),
            Span::styled(
                sanitize(entry.event.as_str()).into_owned(),
                app.theme.badge_style(badge),
            ),
            Span::raw(format!("  ({})", badge.map(|b| b.class()).unwrap_or("no badge"))),
        ]),
    ];

    frame.render_widget(Paragraph::new(header_lines).block(header_block), chunks[0]);

    let related: Vec<Row> = app
        .threats
        .iter()
        .filter(|t| t.ip_address == entry.ip_address)
        .map(|t| {
            Row::new(vec![
                Cell::from(format_timestamp(&t.timestamp)),
                Cell::from(sanitize(&t.alert_type).into_owned())
                    .style(Style::default().fg(app.theme.danger)),
                Cell::from(sanitize(t.description.as_deref().unwrap_or("-")).into_owned()),
            ])
        })
        .collect();

    let related_block = Block::default()
        .title(format!(" Threats for this address ({}) ", related.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if related.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  None recorded",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .block(related_block);
        frame.render_widget(empty, chunks[1]);
    } else {
        let widths = [Constraint::Length(19), Constraint::Fill(1), Constraint::Fill(2)];
        let table = Table::new(related, widths)
            .header(
                Row::new(vec!["Time", "Type", "Description"]).style(app.theme.header),
            )
            .block(related_block);
        frame.render_widget(table, chunks[1]);
    }

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[2]);
}
