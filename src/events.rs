use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Allow scrolling through providers while overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::PageUp => app.select_prev_n(10),
            KeyCode::PageDown => app.select_next_n(10),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access (provider detail is overlay-only, accessed via Enter)
        KeyCode::Char('1') => app.set_view(View::Providers),
        KeyCode::Char('2') => app.set_view(View::Categories),
        KeyCode::Char('3') => app.set_view(View::System),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Enter detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Reload
        KeyCode::Char('r') => {
            let _ = app.reload_data();
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Sorting (Providers and Categories views)
        KeyCode::Char('s') => {
            if app.current_view == View::Providers || app.current_view == View::Categories {
                app.cycle_sort();
            }
        }
        KeyCode::Char('S') => {
            if app.current_view == View::Providers || app.current_view == View::Categories {
                app.toggle_sort_direction();
            }
        }

        // Filter (start typing to filter)
        KeyCode::Char('/') => app.start_filter(),

        // Clear filter
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = std::path::PathBuf::from("mesowatch_export.json");
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => {
            app.select_prev();
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
        }

        // Click to select
        MouseEventKind::Down(MouseButton::Left) => {
            // Calculate which row was clicked (accounting for header/tabs)
            let clicked_row = mouse.row;

            // Check if clicking in content area (after header, tabs, table header)
            if clicked_row > content_start_row {
                let item_row = (clicked_row - content_start_row - 1) as usize;

                match app.current_view {
                    View::Providers => {
                        if let Some(ref data) = app.data {
                            let filtered_count = data
                                .providers
                                .iter()
                                .filter(|p| app.matches_filter(&p.name))
                                .count();
                            // Set visual index directly
                            if item_row < filtered_count {
                                app.selected_provider_index = item_row;
                            }
                        }
                    }
                    View::Categories => {
                        if let Some(ref data) = app.data {
                            let count = data
                                .categories
                                .iter()
                                .filter(|c| app.matches_filter(&c.name))
                                .count();
                            // First table row is the rollup row, which is not selectable
                            if item_row >= 1 && item_row - 1 < count {
                                app.selected_category_index = item_row - 1;
                            }
                        }
                    }
                    View::System => {}
                }
            }

            // Check for tab clicks (row 1, after header)
            if clicked_row == 1 {
                if let Some(view) = crate::ui::common::view_at_column(mouse.column) {
                    app.set_view(view);
                }
            }
        }

        MouseEventKind::Down(MouseButton::Right) => {
            // Right-click goes back
            app.go_back();
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Thresholds;
    use crate::source::{ChannelSource, NetworkSnapshot};
    use crate::ui::Theme;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn test_app() -> App {
        let (tx, source) = ChannelSource::create("test");
        let snapshot: NetworkSnapshot = serde_json::from_str(
            r#"{
                "providers": {
                    "asos": {"expected_rate": 100.0, "actual_rate": 99.0, "stations": 10},
                    "noaa": {"expected_rate": 200.0, "actual_rate": 150.0, "stations": 20}
                },
                "categories": {"ground": {"expected": 300.0, "actual": 249.0}},
                "system": {}
            }"#,
        )
        .unwrap();
        tx.send(snapshot).unwrap();
        let mut app = App::new(Box::new(source), Thresholds::default(), Theme::dark());
        app.reload_data().unwrap();
        app
    }

    #[test]
    fn test_quit_key() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_view_keys() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(app.current_view, View::Categories);
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.current_view, View::System);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.current_view, View::Providers);
    }

    #[test]
    fn test_any_key_closes_help() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert!(!app.show_help);
    }

    #[test]
    fn test_filter_input_capture() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        assert!(app.filter_active);
        handle_key_event(&mut app, key(KeyCode::Char('n')));
        handle_key_event(&mut app, key(KeyCode::Char('o')));
        assert_eq!(app.filter_text, "no");
        // Keys are captured by the filter, not interpreted as commands
        assert!(app.running);
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(!app.filter_active);
        assert_eq!(app.filter_text, "no");
    }

    #[test]
    fn test_detail_overlay_keys() {
        let mut app = test_app();
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(app.show_detail_overlay);
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn test_sort_key_cycles_column() {
        let mut app = test_app();
        let before = app.sort_column;
        handle_key_event(&mut app, key(KeyCode::Char('s')));
        assert_ne!(app.sort_column, before);
        // Sorting keys do nothing in the System view
        app.set_view(View::System);
        let before = app.category_sort_column;
        handle_key_event(&mut app, key(KeyCode::Char('s')));
        assert_eq!(app.category_sort_column, before);
    }

    #[test]
    fn test_tab_click_selects_view() {
        let mut app = test_app();
        let click = |col| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse_event(&mut app, click(20), 3);
        assert_eq!(app.current_view, View::Categories);

        handle_mouse_event(&mut app, click(35), 3);
        assert_eq!(app.current_view, View::System);

        // Divider and far-right clicks leave the view unchanged
        handle_mouse_event(&mut app, click(32), 3);
        assert_eq!(app.current_view, View::System);
        handle_mouse_event(&mut app, click(120), 3);
        assert_eq!(app.current_view, View::System);
    }

    #[test]
    fn test_scroll_changes_selection() {
        let mut app = test_app();
        let mouse = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, mouse, 2);
        assert_eq!(app.selected_provider_index, 1);
    }
}
