//! UI rendering functions
//!
//! Layout:
//! - Header: processor name and sensor source
//! - Grid: one chart per core, current reading plus high/critical threshold lines
//! - Footer: controls and sampling settings

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use super::app::App;
use crate::hwmon::CoreSample;
use crate::window::CoreSeries;

mod colors {
    use ratatui::style::Color;

    /// Live reading
    pub const CURRENT: Color = Color::Green;
    /// Area under the live reading
    pub const FILL: Color = Color::Rgb(0, 100, 0);
    /// Vendor "high" threshold
    pub const HIGH: Color = Color::Rgb(255, 165, 0);
    /// Vendor "critical" threshold
    pub const CRITICAL: Color = Color::Red;
    pub const BORDER: Color = Color::White;
    pub const AXIS: Color = Color::DarkGray;
    pub const TITLE: Color = Color::White;
    pub const INACTIVE: Color = Color::DarkGray;
}

/// Rows and columns of a near-square grid holding `n` panels
///
/// Columns are `ceil(sqrt(n))`, rows are whatever it takes to fit every panel.
pub fn grid_dimensions(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let mut cols = 1;
    while cols * cols < n {
        cols += 1;
    }
    let rows = n.div_ceil(cols);
    (rows, cols)
}

/// Colour for a reading relative to its thresholds
fn temperature_color(sample: &CoreSample) -> Color {
    match sample.current {
        t if sample.critical > 0.0 && t >= sample.critical => colors::CRITICAL,
        t if sample.high > 0.0 && t >= sample.high => colors::HIGH,
        _ => colors::TITLE,
    }
}

/// Main drawing function
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    draw_grid(f, chunks[1], app);
    draw_footer(f, chunks[2], app);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            app.header_title(),
            Style::default()
                .fg(colors::TITLE)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} cores", app.monitor.cores().len()),
            Style::default().fg(colors::INACTIVE),
        ),
    ]);

    let header = Paragraph::new(title).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::BORDER)),
    );
    f.render_widget(header, area);
}

fn draw_grid(f: &mut Frame, area: Rect, app: &App) {
    let cores: Vec<&CoreSeries> = app.monitor.cores().iter().collect();
    let (rows, cols) = grid_dimensions(cores.len());
    if rows == 0 {
        return;
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            if let Some(series) = cores.get(row * cols + col) {
                draw_core_chart(f, *cell, series, app.show_legend);
            }
        }
    }
}

fn draw_core_chart(f: &mut Frame, area: Rect, series: &CoreSeries, show_legend: bool) {
    let current = series.current_points();
    let high = series.high_points();
    let critical = series.critical_points();

    // The unnamed fill goes first so the curves are drawn over it and it stays out of the legend
    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(colors::FILL))
            .data(&current),
        Dataset::default()
            .name("Temp (°C)")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(colors::CURRENT))
            .data(&current),
        Dataset::default()
            .name("High")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(colors::HIGH))
            .data(&high),
        Dataset::default()
            .name("Critical")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(colors::CRITICAL))
            .data(&critical),
    ];

    let title = match series.latest() {
        Some(latest) if !series.is_vanished() => Span::styled(
            format!(" {} {:.1}°C ", series.label(), latest.current),
            Style::default().fg(temperature_color(latest)),
        ),
        _ => Span::styled(
            format!(" {} (no reading) ", series.label()),
            Style::default().fg(colors::INACTIVE),
        ),
    };

    let ceiling = series.y_ceiling();
    let y_labels = vec![
        "0".to_string(),
        format!("{:.0}", ceiling / 2.0),
        format!("{:.0}", ceiling),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::BORDER))
                .title(title),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(colors::AXIS))
                .bounds([0.0, series.capacity() as f64]),
        )
        .y_axis(
            Axis::default()
                .title("°C")
                .style(Style::default().fg(colors::AXIS))
                .labels(y_labels)
                .bounds([0.0, ceiling]),
        )
        .legend_position(show_legend.then_some(LegendPosition::TopLeft));

    f.render_widget(chart, area);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer = Line::from(vec![
        Span::styled("q", Style::default().fg(colors::TITLE).add_modifier(Modifier::BOLD)),
        Span::styled(" quit  ", Style::default().fg(colors::INACTIVE)),
        Span::styled("l", Style::default().fg(colors::TITLE).add_modifier(Modifier::BOLD)),
        Span::styled(" legend  ", Style::default().fg(colors::INACTIVE)),
        Span::styled(
            format!(
                "| {} | every {} ms | tick {}",
                app.monitor.source(),
                app.monitor.refresh_interval().as_millis(),
                app.monitor.ticks()
            ),
            Style::default().fg(colors::INACTIVE),
        ),
    ]);
    f.render_widget(Paragraph::new(footer), area);
}
