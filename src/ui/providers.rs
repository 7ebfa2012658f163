//! Providers view rendering.
//!
//! Displays a table of all providers with coverage, ingestion rates,
//! completeness percentage, and sparkline trends.

use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use super::format_count;
use crate::app::App;
use crate::data::ProviderData;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Column to sort by in the Providers view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderSortColumn {
    /// Sort by provider name alphabetically.
    #[default]
    Name,
    /// Sort by station count.
    Stations,
    /// Sort by expected rate.
    Expected,
    /// Sort by actual rate.
    Actual,
    /// Sort by completeness percentage.
    Percent,
    /// Sort by ingestion status.
    Status,
}

impl ProviderSortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            ProviderSortColumn::Name => ProviderSortColumn::Stations,
            ProviderSortColumn::Stations => ProviderSortColumn::Expected,
            ProviderSortColumn::Expected => ProviderSortColumn::Actual,
            ProviderSortColumn::Actual => ProviderSortColumn::Percent,
            ProviderSortColumn::Percent => ProviderSortColumn::Status,
            ProviderSortColumn::Status => ProviderSortColumn::Name,
        }
    }
}

/// Render the Providers view showing all providers in a sortable table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    // Get filtered and sorted provider indices
    let mut providers: Vec<(usize, &ProviderData)> =
        data.providers.iter().enumerate().filter(|(_, p)| app.matches_filter(&p.name)).collect();
    sort_providers_by(&mut providers, app.sort_column, app.sort_ascending);

    let header = Row::new(vec![
        Cell::from(format_header("Provider", ProviderSortColumn::Name, app)),
        Cell::from(format_header("Stations", ProviderSortColumn::Stations, app)),
        Cell::from("Cov"),
        Cell::from(format_header("Expected/h", ProviderSortColumn::Expected, app)),
        Cell::from(format_header("Actual/h", ProviderSortColumn::Actual, app)),
        Cell::from(format_header("%", ProviderSortColumn::Percent, app)),
        Cell::from("Trend"),
        Cell::from(format_header("Status", ProviderSortColumn::Status, app)),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = providers
        .iter()
        .map(|(_, p)| {
            let status_style = app.theme.status_style(p.status);
            let coverage_style = app.theme.status_style(p.coverage);

            let sparkline = render_sparkline(&app.history.rate_sparkline(&p.name));

            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(p.stations.to_string()),
                Cell::from("●").style(coverage_style),
                Cell::from(format_count(p.expected_rate)),
                Cell::from(format_count(p.actual_rate)),
                Cell::from(format!("{:.1}%", p.percent)).style(status_style),
                Cell::from(sparkline),
                Cell::from(p.status.symbol()).style(status_style),
            ])
        })
        .collect();

    // Use Fill to distribute space evenly while respecting minimum widths
    let widths = [
        Constraint::Fill(3), // Provider - gets 3x share (largest)
        Constraint::Fill(1), // Stations
        Constraint::Min(4),  // Coverage lamp
        Constraint::Fill(1), // Expected/h
        Constraint::Fill(1), // Actual/h
        Constraint::Fill(1), // Percent
        Constraint::Min(8),  // Trend/Sparkline - fixed 8 for sparkline chars
        Constraint::Min(6),  // Status - fixed minimum
    ];

    // selected_provider_index is a visual index into the sorted/filtered list
    let selected_visual_index = app.selected_provider_index.min(providers.len().saturating_sub(1));

    let sort_indicator = match app.sort_column {
        ProviderSortColumn::Name => "name",
        ProviderSortColumn::Stations => "stations",
        ProviderSortColumn::Expected => "expected",
        ProviderSortColumn::Actual => "actual",
        ProviderSortColumn::Percent => "percent",
        ProviderSortColumn::Status => "status",
    };
    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    // Build title with filter info
    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    // Show scroll position if there are items
    let position_info = if !providers.is_empty() {
        format!(" [{}/{}]", selected_visual_index + 1, providers.len())
    } else {
        String::new()
    };

    let title = format!(
        " Providers ({}/{}) [s:sort {}{}]{}{} ",
        providers.len(),
        data.providers.len(),
        sort_indicator,
        sort_dir,
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(ratatui::style::Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected_visual_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: ProviderSortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// Sort providers by the given column and direction (public for use in app.rs)
pub fn sort_providers_by(
    providers: &mut [(usize, &ProviderData)],
    column: ProviderSortColumn,
    ascending: bool,
) {
    providers.sort_by(|a, b| {
        let primary = match column {
            ProviderSortColumn::Name => a.1.name.cmp(&b.1.name),
            ProviderSortColumn::Stations => a.1.stations.cmp(&b.1.stations),
            ProviderSortColumn::Expected => a.1.expected_rate.total_cmp(&b.1.expected_rate),
            ProviderSortColumn::Actual => a.1.actual_rate.total_cmp(&b.1.actual_rate),
            ProviderSortColumn::Percent => a.1.percent.total_cmp(&b.1.percent),
            ProviderSortColumn::Status => a.1.status.cmp(&b.1.status),
        };

        // Apply direction to primary comparison
        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        // Use secondary sort by name for stability when primary values are equal
        if primary == std::cmp::Ordering::Equal {
            a.1.name.cmp(&b.1.name)
        } else {
            primary
        }
    });
}

fn render_sparkline(data: &[u8]) -> String {
    if data.is_empty() {
        return "        ".to_string(); // 8 spaces placeholder
    }

    // Take last 8 values
    let values: Vec<u8> = data.iter().rev().take(8).rev().copied().collect();

    values.iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}
