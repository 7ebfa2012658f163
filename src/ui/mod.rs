//! Terminal rendering using ratatui.
//!
//! Each view gets its own submodule; [`common`] holds the header bar,
//! tab bar, status bar, and help overlay shared by all of them.

pub mod categories;
pub mod common;
pub mod detail;
pub mod providers;
pub mod system;
pub mod theme;

pub use categories::CategorySortColumn;
pub use providers::ProviderSortColumn;
pub use theme::Theme;

/// Format a count for display (e.g., 1234 -> "1.2K", 1234567 -> "1.2M").
pub(crate) fn format_count(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{:.0}", n)
    }
}
