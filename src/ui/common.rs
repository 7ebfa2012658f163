//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::format_count;
use crate::app::{App, View};
use crate::data::Status;

/// Render the header bar with the network-wide health overview.
///
/// Displays: the traffic-light indicator driven by the overall rollup,
/// provider counts by status, and total ingestion throughput.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(
                " MESONET STATUS ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let (high, medium, low) = data.provider_status_counts();
    let total = data.providers.len();

    let mut spans = vec![Span::raw(" ")];
    spans.extend(traffic_light(app, data.overall.status));
    spans.extend(vec![
        Span::styled(" MESONET ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(format!("{}", high), Style::default().fg(app.theme.high)),
        Span::raw(" high "),
        if medium > 0 {
            Span::styled(format!("{}", medium), Style::default().fg(app.theme.medium))
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" med "),
        if low > 0 {
            Span::styled(
                format!("{}", low),
                Style::default().fg(app.theme.low).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" low │ "),
        Span::styled(
            format!("{}", total),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" providers │ "),
        Span::styled(
            format!("{:.1}%", data.overall.percent),
            app.theme.status_style(data.overall.status).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " of {}/h",
            format_count(data.categories.iter().map(|c| c.expected).sum())
        )),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The three-lamp traffic light: all lamps shown, the active one bright.
fn traffic_light(app: &App, status: Status) -> Vec<Span<'static>> {
    let lamp = |lamp_status: Status| {
        let color = app.theme.status_color(lamp_status);
        if lamp_status == status {
            Span::styled("●", Style::default().fg(color).add_modifier(Modifier::BOLD))
        } else {
            Span::styled("○", Style::default().fg(color).add_modifier(Modifier::DIM))
        }
    };
    vec![lamp(Status::Low), lamp(Status::Medium), lamp(Status::High)]
}

/// Views in tab-bar order.
const TAB_VIEWS: [View; 3] = [View::Providers, View::Categories, View::System];

fn tab_title(index: usize, view: View) -> String {
    format!(" {}:{} ", index + 1, view.label())
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TAB_VIEWS
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(tab_title(i, *view)))
        .collect();

    let selected = match app.current_view {
        View::Providers => 0,
        View::Categories => 1,
        View::System => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Map a click column on the tab bar to the view whose tab covers it.
///
/// Computed from the same titles [`render_tabs`] draws, accounting for
/// the one-cell padding Tabs adds around each title and the one-cell
/// divider between tabs. Returns None for the divider cells and for
/// columns past the last tab.
pub fn view_at_column(col: u16) -> Option<View> {
    let mut start = 0u16;
    for (i, view) in TAB_VIEWS.iter().enumerate() {
        if i > 0 {
            start += 1; // divider
        }
        // padding + title + padding
        let width = tab_title(i, *view).chars().count() as u16 + 2;
        if col < start {
            return None; // on the divider
        }
        if col < start + width {
            return Some(*view);
        }
        start += width;
    }
    None
}

/// Render the status bar at the bottom.
///
/// Shows: breadcrumb trail, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref data) = app.data {
        let elapsed = data.last_updated.elapsed();
        let breadcrumb = app.breadcrumb();

        // Context-sensitive controls
        let controls = match app.current_view {
            View::Providers | View::Categories => {
                if app.filter_active {
                    "Type to search | Enter:apply Esc:cancel"
                } else {
                    "/:search s:sort Tab:switch Enter:detail ?:help q:quit"
                }
            }
            View::System => "Tab:switch r:reload ?:help q:quit",
        };

        format!(
            " {} | {} | Updated {:.1}s ago | {}",
            breadcrumb,
            app.source_description(),
            elapsed.as_secs_f64(),
            controls,
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       View provider detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Providers & Categories",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Reload data"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
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
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 24u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_at_column_matches_rendered_tabs() {
        // Tab regions follow the rendered title widths, including padding
        assert_eq!(view_at_column(0), Some(View::Providers));
        assert_eq!(view_at_column(14), Some(View::Providers));
        assert_eq!(view_at_column(15), None); // divider
        assert_eq!(view_at_column(16), Some(View::Categories));
        assert_eq!(view_at_column(31), Some(View::Categories));
        assert_eq!(view_at_column(32), None); // divider
        assert_eq!(view_at_column(33), Some(View::System));
        assert_eq!(view_at_column(44), Some(View::System));
    }

    #[test]
    fn test_view_at_column_past_tabs() {
        assert_eq!(view_at_column(45), None);
        assert_eq!(view_at_column(200), None);
    }
}
