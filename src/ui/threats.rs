//! Threat view rendering.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::sanitize;

/// Render the Threats view. The title carries the visible threat count.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let table = &app.threat_table;

    let title = format!(
        " Threats: {} [f:type {}] ",
        table.count,
        sanitize(app.filters.threat.label())
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if table.is_empty() {
        let message = if app.threats.is_empty() {
            "  No active threats"
        } else {
            "  No threats match the filter"
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                message,
                Style::default().fg(app.theme.ok).add_modifier(Modifier::BOLD),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Time"),
        Cell::from("IP Address"),
        Cell::from("Alert Type"),
        Cell::from("Status"),
        Cell::from("Actions"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.time.clone()),
                Cell::from(row.ip.clone()),
                Cell::from(row.alert_type.clone()),
                Cell::from(row.badge.class()).style(app.theme.badge_style(Some(row.badge))),
                Cell::from(format!("b:{} v:{}", row.block.label(), row.resolve.label()))
                    .style(Style::default().add_modifier(Modifier::DIM)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(19), // Time
        Constraint::Fill(2),    // IP
        Constraint::Fill(2),    // Alert type
        Constraint::Length(14), // Status
        Constraint::Min(18),    // Actions
    ];

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_threat.min(table.count.saturating_sub(1))));

    frame.render_stateful_widget(widget, area, &mut state);
}
