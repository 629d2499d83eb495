//! Log view rendering.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, InputMode};
use crate::data::sanitize;

/// Render the Logs view: the filtered log table with its filter controls in
/// the title.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let table = &app.log_table;

    let filter_info = match app.input_mode {
        InputMode::IpFilter => format!(" ip:/{}_", sanitize(&app.filters.ip)),
        _ if !app.filters.ip.is_empty() => {
            format!(" ip:/{}/ [c:clear]", sanitize(&app.filters.ip))
        }
        _ => String::new(),
    };

    let position_info = if !table.is_empty() {
        format!(" [{}/{}]", app.selected_log + 1, table.len())
    } else {
        String::new()
    };

    let title = format!(
        " Logs ({}/{}) [f:event {}]{}{} ",
        table.len(),
        app.logs.len(),
        app.filters.event.label(),
        filter_info,
        position_info
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if table.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No log entries",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Time"),
        Cell::from("IP Address"),
        Cell::from("Event"),
        Cell::from("Status"),
        Cell::from("Actions"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            let badge_style = app.theme.badge_style(row.badge);
            let badge = row.badge.map(|b| b.class()).unwrap_or("-");
            Row::new(vec![
                Cell::from(row.time.clone()),
                Cell::from(row.ip.clone()),
                Cell::from(row.event.clone()),
                Cell::from(badge).style(badge_style),
                Cell::from(format!("b:{} ⏎:{}", row.block.label(), row.details.label()))
                    .style(Style::default().add_modifier(Modifier::DIM)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(19), // Time
        Constraint::Fill(2),    // IP
        Constraint::Fill(1),    // Event
        Constraint::Length(14), // Status
        Constraint::Min(18),    // Actions
    ];

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_log.min(table.len().saturating_sub(1))));

    frame.render_stateful_widget(widget, area, &mut state);
}
