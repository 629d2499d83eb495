//! Traffic view rendering.
//!
//! Shows the time-range selector above a line chart of the most recently
//! fetched traffic series.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::{App, TimeRange};
use crate::data::sanitize;

/// Render the Traffic view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(6)]).split(area);

    render_time_range(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
}

fn render_time_range(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" Range: ")];
    for range in TimeRange::ALL {
        let style = if range == app.time_range {
            app.theme.tab_active.add_modifier(Modifier::REVERSED)
        } else {
            app.theme.tab_inactive
        };
        spans.push(Span::styled(format!(" {} ", range.label()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("[ ]:change", Style::default().add_modifier(Modifier::DIM)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let chart = &app.chart;
    let block = Block::default()
        .title(format!(" {} ", chart.style.title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if chart.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "  No traffic data",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let points = chart.points();
    let dataset = Dataset::default()
        .name(chart.style.series_name.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.series))
        .data(&points);

    let x_labels: Vec<Span> = chart
        .axis_labels()
        .into_iter()
        .map(|label| Span::raw(sanitize(label).into_owned()))
        .collect();

    let [y_min, y_max] = chart.y_bounds();
    let y_labels = vec![
        Span::raw(format!("{:.0}", y_min)),
        Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
        Span::raw(format!("{:.0}", y_max)),
    ];

    let widget = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds(chart.x_bounds())
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(widget, area);
}
