//! Application state and navigation logic.

use anyhow::Result;

use crate::data::{History, NetworkData, Status, Thresholds};
use crate::source::DataSource;
use crate::ui::{CategorySortColumn, ProviderSortColumn, Theme};

/// The current view/tab in the TUI.
///
/// Provider detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Per-provider coverage and ingestion rates.
    Providers,
    /// Per-category record counts with the network rollup.
    Categories,
    /// Ingest gateway resource usage and throughput.
    System,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Providers => View::Categories,
            View::Categories => View::System,
            View::System => View::Providers,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Providers => View::System,
            View::Categories => View::Providers,
            View::System => View::Categories,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Providers => "Providers",
            View::Categories => "Categories",
            View::System => "System",
        }
    }
}

/// Saved state for returning to a previous view.
///
/// Used by the view stack to restore navigation state when going back.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// The view that was active.
    pub view: View,
    /// The selected provider index in that view.
    pub selected_provider_index: usize,
    /// The selected category index (for Categories view).
    pub selected_category_index: usize,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<NetworkData>,
    pub history: History,
    pub load_error: Option<String>,
    pub thresholds: Thresholds,

    // Navigation state
    pub selected_provider_index: usize,
    pub selected_category_index: usize,
    pub view_stack: Vec<ViewState>,

    // Sorting (Providers view)
    pub sort_column: ProviderSortColumn,
    pub sort_ascending: bool,

    // Sorting (Categories view)
    pub category_sort_column: CategorySortColumn,
    pub category_sort_ascending: bool,

    // Search/filter
    pub filter_text: String,
    pub filter_active: bool,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, std::time::Instant)>,
}

impl App {
    /// Create a new App with the given data source, thresholds, and theme.
    pub fn new(source: Box<dyn DataSource>, thresholds: Thresholds, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Providers,
            show_help: false,
            show_detail_overlay: false,
            source,
            data: None,
            history: History::new(),
            load_error: None,
            thresholds,
            selected_provider_index: 0,
            selected_category_index: 0,
            view_stack: Vec::new(),
            sort_column: ProviderSortColumn::default(),
            sort_ascending: true,
            category_sort_column: CategorySortColumn::default(),
            category_sort_ascending: true, // Default ascending (worst first)
            filter_text: String::new(),
            filter_active: false,
            theme,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, std::time::Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Push current state to stack and navigate to a new view.
    #[allow(dead_code)]
    pub fn push_view(&mut self, view: View) {
        self.view_stack.push(ViewState {
            view: self.current_view,
            selected_provider_index: self.selected_provider_index,
            selected_category_index: self.selected_category_index,
        });
        self.current_view = view;
        self.selected_category_index = 0;
    }

    /// Pop the view stack and restore previous state.
    pub fn pop_view(&mut self) -> bool {
        if let Some(state) = self.view_stack.pop() {
            self.current_view = state.view;
            self.selected_provider_index = state.selected_provider_index;
            self.selected_category_index = state.selected_category_index;
            true
        } else {
            false
        }
    }

    /// Get breadcrumb trail for current navigation.
    pub fn breadcrumb(&self) -> String {
        let mut parts: Vec<&str> = self.view_stack.iter().map(|s| s.view.label()).collect();
        parts.push(self.current_view.label());
        parts.join(" > ")
    }

    /// Poll the data source for new data.
    ///
    /// Returns Ok(true) if new data was received, Ok(false) if no new data,
    /// or Err if there was an error.
    pub fn reload_data(&mut self) -> Result<bool> {
        // Check for errors from the source
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
            return Ok(false);
        }

        // Poll for new data
        if let Some(snapshot) = self.source.poll() {
            let data = NetworkData::from_snapshot(snapshot, &self.thresholds);

            // Record history before updating
            self.history.record(&data);
            self.data = Some(data);
            self.load_error = None;

            // Clamp selection indices
            if let Some(ref data) = self.data {
                if self.selected_provider_index >= data.providers.len() {
                    self.selected_provider_index = data.providers.len().saturating_sub(1);
                }
                if self.selected_category_index >= data.categories.len() {
                    self.selected_category_index = data.categories.len().saturating_sub(1);
                }
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Switch to the next view (cycles through Providers → Categories → System).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
        self.selected_category_index = 0;
    }

    /// Switch to the previous view (cycles through System → Categories → Providers).
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
        self.selected_category_index = 0;
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.selected_category_index = 0;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::Providers => {
                // Navigate by visual position in filtered/sorted list
                if let Some(ref data) = self.data {
                    let filtered_count = self.filtered_provider_count(data);
                    let max = filtered_count.saturating_sub(1);
                    self.selected_provider_index = (self.selected_provider_index + n).min(max);
                }
            }
            View::Categories => {
                if let Some(ref data) = self.data {
                    let count = self.filtered_category_count(data);
                    let max = count.saturating_sub(1);
                    self.selected_category_index = (self.selected_category_index + n).min(max);
                }
            }
            View::System => {}
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Providers => {
                self.selected_provider_index = self.selected_provider_index.saturating_sub(n);
            }
            View::Categories => {
                self.selected_category_index = self.selected_category_index.saturating_sub(n);
            }
            View::System => {}
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::Providers => {
                self.selected_provider_index = 0;
            }
            View::Categories => {
                self.selected_category_index = 0;
            }
            View::System => {}
        }
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        match self.current_view {
            View::Providers => {
                if let Some(ref data) = self.data {
                    let filtered_count = self.filtered_provider_count(data);
                    self.selected_provider_index = filtered_count.saturating_sub(1);
                }
            }
            View::Categories => {
                if let Some(ref data) = self.data {
                    let count = self.filtered_category_count(data);
                    self.selected_category_index = count.saturating_sub(1);
                }
            }
            View::System => {}
        }
    }

    /// Get count of providers after applying filter.
    fn filtered_provider_count(&self, data: &NetworkData) -> usize {
        if self.filter_text.is_empty() {
            return data.providers.len();
        }
        data.providers.iter().filter(|p| self.matches_filter(&p.name)).count()
    }

    /// Get count of categories after applying filter.
    fn filtered_category_count(&self, data: &NetworkData) -> usize {
        if self.filter_text.is_empty() {
            return data.categories.len();
        }
        data.categories.iter().filter(|c| self.matches_filter(&c.name)).count()
    }

    /// Get the actual provider index from the visual index (after sorting/filtering).
    ///
    /// Returns the raw index into `data.providers` for the currently selected
    /// visual row. This is needed because the Providers view applies sorting
    /// and filtering, so the visual row index differs from the underlying
    /// data index.
    pub fn get_selected_provider_raw_index(&self) -> Option<usize> {
        let data = self.data.as_ref()?;

        // Build sorted/filtered list and look up raw index
        let mut providers: Vec<(usize, &crate::data::ProviderData)> = data
            .providers
            .iter()
            .enumerate()
            .filter(|(_, p)| self.matches_filter(&p.name))
            .collect();
        crate::ui::providers::sort_providers_by(
            &mut providers,
            self.sort_column,
            self.sort_ascending,
        );

        providers.get(self.selected_provider_index).map(|(idx, _)| *idx)
    }

    /// Open the detail overlay for the currently selected provider.
    pub fn enter_detail(&mut self) {
        // Only providers have a detail overlay
        if self.current_view == View::Providers {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then pop view stack, then go to Providers.
    pub fn go_back(&mut self) {
        // First close any overlays
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        // Then try to pop the view stack
        if !self.pop_view() {
            // If stack is empty, go to the providers view
            if self.current_view != View::Providers {
                self.current_view = View::Providers;
            }
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Cycle to the next sort column for the current view.
    pub fn cycle_sort(&mut self) {
        match self.current_view {
            View::Providers => self.sort_column = self.sort_column.next(),
            View::Categories => self.category_sort_column = self.category_sort_column.next(),
            View::System => {}
        }
    }

    /// Toggle sort direction between ascending and descending.
    pub fn toggle_sort_direction(&mut self) {
        match self.current_view {
            View::Providers => self.sort_ascending = !self.sort_ascending,
            View::Categories => self.category_sort_ascending = !self.category_sort_ascending,
            View::System => {}
        }
    }

    /// Enter filter input mode (starts capturing keystrokes for search).
    pub fn start_filter(&mut self) {
        self.filter_active = true;
    }

    /// Exit filter input mode without clearing the filter text.
    pub fn cancel_filter(&mut self) {
        self.filter_active = false;
    }

    /// Clear the filter text and exit filter mode.
    pub fn clear_filter(&mut self) {
        self.filter_text.clear();
        self.filter_active = false;
    }

    /// Append a character to the filter text.
    pub fn filter_push(&mut self, c: char) {
        self.filter_text.push(c);
    }

    /// Remove the last character from the filter text.
    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
    }

    /// Check if a provider or category name matches the current filter.
    pub fn matches_filter(&self, name: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        name.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &std::path::Path) -> anyhow::Result<()> {
        use std::io::Write;

        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };

        let mut export = serde_json::Map::new();

        // Summary
        let mut summary = serde_json::Map::new();
        summary.insert(
            "total_providers".to_string(),
            serde_json::json!(data.providers.len()),
        );

        let (high, medium, low) = data.provider_status_counts();
        summary.insert("high".to_string(), serde_json::json!(high));
        summary.insert("medium".to_string(), serde_json::json!(medium));
        summary.insert("low".to_string(), serde_json::json!(low));
        summary.insert(
            "overall_percent".to_string(),
            serde_json::json!(data.overall.percent),
        );
        summary.insert(
            "overall_status".to_string(),
            serde_json::json!(data.overall.status.label()),
        );

        export.insert("summary".to_string(), serde_json::Value::Object(summary));

        // Providers (simplified for in-app export)
        let providers: Vec<serde_json::Value> = data
            .providers
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "stations": p.stations,
                    "expected_rate": p.expected_rate,
                    "actual_rate": p.actual_rate,
                    "percent": p.percent,
                    "status": p.status.label()
                })
            })
            .collect();
        export.insert("providers".to_string(), serde_json::Value::Array(providers));

        // Categories
        let categories: Vec<serde_json::Value> = data
            .categories
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "expected": c.expected,
                    "actual": c.actual,
                    "percent": c.percent,
                    "status": c.status.label()
                })
            })
            .collect();
        export.insert(
            "categories".to_string(),
            serde_json::Value::Array(categories),
        );

        let json = serde_json::to_string_pretty(&serde_json::Value::Object(export))?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ChannelSource, NetworkSnapshot};

    fn sample_snapshot() -> NetworkSnapshot {
        serde_json::from_str(
            r#"{
                "providers": {
                    "asos": {"expected_rate": 100.0, "actual_rate": 99.0, "stations": 10},
                    "noaa": {"expected_rate": 200.0, "actual_rate": 150.0, "stations": 20}
                },
                "categories": {
                    "ground": {"expected": 300.0, "actual": 249.0}
                },
                "system": {"cpu_percent": 40.0}
            }"#,
        )
        .unwrap()
    }

    fn app_with_data() -> App {
        let (tx, source) = ChannelSource::create("test");
        tx.send(sample_snapshot()).unwrap();
        let mut app = App::new(Box::new(source), Thresholds::default(), Theme::dark());
        app.reload_data().unwrap();
        app
    }

    #[test]
    fn test_view_cycling() {
        assert_eq!(View::Providers.next(), View::Categories);
        assert_eq!(View::Categories.next(), View::System);
        assert_eq!(View::System.next(), View::Providers);
        assert_eq!(View::Providers.prev(), View::System);
    }

    #[test]
    fn test_reload_populates_data() {
        let app = app_with_data();
        let data = app.data.as_ref().unwrap();
        assert_eq!(data.providers.len(), 2);
        assert_eq!(data.categories.len(), 1);
        assert_eq!(app.load_error, None);
    }

    #[test]
    fn test_selection_clamped_to_list() {
        let mut app = app_with_data();
        app.select_next_n(100);
        assert_eq!(app.selected_provider_index, 1);
        app.select_prev_n(100);
        assert_eq!(app.selected_provider_index, 0);
    }

    #[test]
    fn test_filter_matching() {
        let mut app = app_with_data();
        assert!(app.matches_filter("NOAA"));
        app.filter_text = "noa".to_string();
        assert!(app.matches_filter("NOAA"));
        assert!(!app.matches_filter("ASOS"));
    }

    #[test]
    fn test_raw_index_follows_sort() {
        let mut app = app_with_data();
        // Providers sort worst-first in the data itself, so raw order is
        // noaa (Low, 75%) then asos (High, 99%). Name sort shows asos first.
        app.sort_column = ProviderSortColumn::Name;
        app.sort_ascending = true;
        app.selected_provider_index = 0;
        let raw = app.get_selected_provider_raw_index().unwrap();
        assert_eq!(app.data.as_ref().unwrap().providers[raw].name, "asos");
    }

    #[test]
    fn test_go_back_closes_overlay_first() {
        let mut app = app_with_data();
        app.enter_detail();
        assert!(app.show_detail_overlay);
        app.go_back();
        assert!(!app.show_detail_overlay);
        assert_eq!(app.current_view, View::Providers);
    }

    #[test]
    fn test_detail_only_from_providers() {
        let mut app = app_with_data();
        app.set_view(View::Categories);
        app.enter_detail();
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn test_status_message_expiry_window() {
        let mut app = app_with_data();
        assert_eq!(app.get_status_message(), None);
        app.set_status_message("Exported".to_string());
        assert_eq!(app.get_status_message(), Some("Exported"));
    }

    #[test]
    fn test_export_state() {
        let app = app_with_data();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        app.export_state(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["summary"]["total_providers"], 2);
        assert_eq!(parsed["providers"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["categories"].as_array().unwrap().len(), 1);
    }
}
