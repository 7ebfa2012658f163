//! System view rendering.
//!
//! Shows the ingest gateway's resource gauges and throughput figures.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::format_count;
use crate::app::App;

/// Render the System view: resource gauges on top, throughput below.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Resource gauges
        Constraint::Min(8),    // Throughput and info
    ])
    .split(area);

    let gauge_chunks = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(chunks[0]);

    render_usage_gauge(frame, app, gauge_chunks[0], "CPU", data.system.cpu_percent);
    render_usage_gauge(frame, app, gauge_chunks[1], "Memory", data.system.memory_percent);
    render_usage_gauge(frame, app, gauge_chunks[2], "Storage", data.system.storage_percent);

    let system = &data.system;
    let info_lines = vec![
        Line::from(""),
        info_line("Ingested", format!("{} records/h", format_count(system.ingested))),
        info_line("Exported", format!("{} records/h", format_count(system.exported))),
        info_line("Network In", format!("{:.0} Mbps", system.network_in_mbps)),
        info_line("Network Out", format!("{:.0} Mbps", system.network_out_mbps)),
        info_line("Latency", format!("{:.1} seconds", system.latency_seconds)),
        info_line("Uptime", format_uptime(system.uptime_seconds)),
    ];

    let info = Paragraph::new(info_lines).block(
        Block::default()
            .title(" Gateway ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border)),
    );

    frame.render_widget(info, chunks[1]);
}

fn render_usage_gauge(frame: &mut Frame, app: &App, area: Rect, label: &str, usage: f64) {
    let status = app.thresholds.usage.classify(usage);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(" {} ", label))
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .gauge_style(Style::default().fg(app.theme.status_color(status)))
        .ratio((usage / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}%", usage));

    frame.render_widget(gauge, area);
}

fn info_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:<12}", format!("{}:", label)),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ])
}

/// Format an uptime in seconds as "12d 5h 32m".
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::format_uptime;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0m");
        assert_eq!(format_uptime(45 * 60), "45m");
        assert_eq!(format_uptime(3 * 3_600 + 12 * 60), "3h 12m");
        assert_eq!(format_uptime(12 * 86_400 + 5 * 3_600 + 32 * 60), "12d 5h 32m");
    }
}
