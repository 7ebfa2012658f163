//! Categories view rendering.
//!
//! Displays per-category ingestion figures with a bold "Total System"
//! rollup row driven by the network-wide aggregate.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use super::format_count;
use crate::app::App;
use crate::data::{CategoryData, Status};

/// Column to sort categories by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySortColumn {
    #[default]
    Status,
    Name,
    Expected,
    Actual,
    Percent,
}

impl CategorySortColumn {
    pub fn next(self) -> Self {
        match self {
            Self::Status => Self::Name,
            Self::Name => Self::Expected,
            Self::Expected => Self::Actual,
            Self::Actual => Self::Percent,
            Self::Percent => Self::Status,
        }
    }
}

/// Render the Categories view as a table with a rollup row.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        return;
    };

    // Filter by search text
    let mut categories: Vec<&CategoryData> =
        data.categories.iter().filter(|c| app.matches_filter(&c.name)).collect();
    sort_categories(
        &mut categories,
        app.category_sort_column,
        app.category_sort_ascending,
    );

    let header = Row::new(vec![
        Cell::from(format_header("Category", CategorySortColumn::Name, app)),
        Cell::from(format_header("Expected/h", CategorySortColumn::Expected, app)),
        Cell::from(format_header("Last Hour", CategorySortColumn::Actual, app)),
        Cell::from(format_header("%", CategorySortColumn::Percent, app)),
        Cell::from(format_header("Status", CategorySortColumn::Status, app)),
    ])
    .height(1)
    .style(app.theme.header);

    // Rollup row first, in bold, then the per-category rows
    let overall_style = app.theme.status_style(data.overall.status).add_modifier(Modifier::BOLD);
    let mut rows: Vec<Row> = vec![Row::new(vec![
        Cell::from("Total System").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(format_count(data.categories.iter().map(|c| c.expected).sum()))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(format_count(data.categories.iter().map(|c| c.actual).sum()))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(format!("{:.2}%", data.overall.percent)).style(overall_style),
        Cell::from(data.overall.status.symbol()).style(overall_style),
    ])];

    rows.extend(categories.iter().map(|c| {
        let status_style = app.theme.status_style(c.status);
        Row::new(vec![
            Cell::from(c.name.clone()),
            Cell::from(format_count(c.expected)),
            Cell::from(format_count(c.actual)),
            Cell::from(format!("{:.2}%", c.percent)).style(status_style),
            Cell::from(c.status.symbol()).style(status_style),
        ])
    }));

    let widths = [
        Constraint::Fill(3),    // Category
        Constraint::Fill(1),    // Expected/h
        Constraint::Fill(1),    // Last Hour
        Constraint::Length(9),  // Percent
        Constraint::Length(6),  // Status
    ];

    // Count categories below High for the title
    let low_count = categories.iter().filter(|c| c.status == Status::Low).count();
    let medium_count = categories.iter().filter(|c| c.status == Status::Medium).count();

    let sort_indicator = match app.category_sort_column {
        CategorySortColumn::Status => "status",
        CategorySortColumn::Name => "name",
        CategorySortColumn::Expected => "expected",
        CategorySortColumn::Actual => "actual",
        CategorySortColumn::Percent => "percent",
    };
    let sort_dir = if app.category_sort_ascending { "↑" } else { "↓" };

    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    let title = format!(
        " Categories ({} low, {} med) [s:sort {}{}]{} ",
        low_count, medium_count, sort_indicator, sort_dir, filter_info
    );

    let border_color = if low_count > 0 {
        app.theme.low
    } else if medium_count > 0 {
        app.theme.medium
    } else {
        app.theme.border
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(border_color)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    // Offset by one: the rollup row is not selectable
    let selected = app.selected_category_index.min(categories.len().saturating_sub(1));
    let mut state = TableState::default();
    if !categories.is_empty() {
        state.select(Some(selected + 1));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: CategorySortColumn, app: &App) -> Span<'static> {
    if app.category_sort_column == col {
        let arrow = if app.category_sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

fn sort_categories(items: &mut [&CategoryData], column: CategorySortColumn, ascending: bool) {
    items.sort_by(|a, b| {
        let primary = match column {
            CategorySortColumn::Status => a.status.cmp(&b.status),
            CategorySortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            CategorySortColumn::Expected => a.expected.total_cmp(&b.expected),
            CategorySortColumn::Actual => a.actual.total_cmp(&b.actual),
            CategorySortColumn::Percent => a.percent.total_cmp(&b.percent),
        };

        // Apply direction to primary comparison
        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        // Use secondary sort by name for stability
        if primary == std::cmp::Ordering::Equal {
            a.name.to_lowercase().cmp(&b.name.to_lowercase())
        } else {
            primary
        }
    });
}
