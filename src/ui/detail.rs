//! Detail overlay rendering.
//!
//! Displays a modal overlay with detailed information about a selected
//! provider.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::format_count;
use crate::app::App;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the provider detail as a modal overlay.
///
/// Shows the provider's ingestion figures, coverage, location, and the
/// full rate trend.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(ref data) = app.data else {
        return;
    };

    // Get the actual provider from the visual index
    let Some(raw_index) = app.get_selected_provider_raw_index() else {
        return;
    };
    let Some(provider) = data.providers.get(raw_index) else {
        return;
    };

    // Width: 80% of screen, clamped to [MIN_OVERLAY_WIDTH, 90]
    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    let overlay_height = MIN_OVERLAY_HEIGHT.max(16).min(area.height.saturating_sub(2));

    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Min(10),   // Provider info
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    let status_style = app.theme.status_style(provider.status);
    let coverage_style = app.theme.status_style(provider.coverage);

    let sparkline = app.history.rate_sparkline(&provider.name);
    let trend: String = if sparkline.is_empty() {
        "no history yet".to_string()
    } else {
        sparkline.iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
    };

    let delta = app
        .history
        .rate_delta(&provider.name)
        .map(|d| format!("{:+.1}/h per s", d))
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(vec![Span::styled(
            format!(" {} ", provider.name),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Ingestion: "),
            Span::styled(
                format!("{} {:.2}%", provider.status.symbol(), provider.percent),
                status_style.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    Coverage: "),
            Span::styled(
                format!("{} ({} stations)", provider.coverage.symbol(), provider.stations),
                coverage_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Expected: "),
            Span::styled(
                format!("{}/h", format_count(provider.expected_rate)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    Actual: "),
            Span::styled(
                format!("{}/h", format_count(provider.actual_rate)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Location: "),
            Span::raw(format!("{:.2}, {:.2}", provider.lat, provider.lon)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" Trend: "),
            Span::styled(trend, status_style),
            Span::raw("  "),
            Span::styled(delta, Style::default().add_modifier(Modifier::DIM)),
        ]),
    ];

    let block = Block::default()
        .title(" Provider Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[1]);
}
