// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Terminal,
};

mod app;
mod data;
mod events;
mod settings;
mod source;
mod ui;

use app::{App, View};
use settings::Settings;
use source::{DataSource, FileSource, SampleSource, StreamSource};
use ui::Theme;

#[derive(Parser, Debug)]
#[command(name = "mesowatch")]
#[command(about = "Operational TUI for monitoring mesonet provider coverage and record ingestion")]
struct Args {
    /// Path to network.json file
    #[arg(short, long, default_value = "network.json", conflicts_with_all = ["connect", "sample"])]
    file: PathBuf,

    /// Connect to a TCP endpoint for live snapshots (host:port)
    #[arg(short, long, conflicts_with_all = ["file", "sample"])]
    connect: Option<String>,

    /// Run with generated sample data (no ingest gateway required)
    #[arg(long, conflicts_with_all = ["file", "connect"])]
    sample: bool,

    /// Refresh interval in seconds (only used with --file and --sample)
    #[arg(short = 'r', long, default_value = "1")]
    refresh: u64,

    /// Path to a TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Completeness percentage required for high status
    #[arg(long)]
    percent_high: Option<f64>,

    /// Completeness percentage required for medium status
    #[arg(long)]
    percent_medium: Option<f64>,

    /// Station count required for high coverage status
    #[arg(long)]
    count_high: Option<u64>,

    /// Station count required for medium coverage status
    #[arg(long)]
    count_medium: Option<u64>,

    /// Export current state to JSON file and exit
    #[arg(short, long, conflicts_with_all = ["connect", "sample"])]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref())?;

    // CLI flags override settings-file thresholds
    let mut thresholds = settings.thresholds;
    if let Some(v) = args.percent_high {
        thresholds.percent.high = v;
    }
    if let Some(v) = args.percent_medium {
        thresholds.percent.medium = v;
    }
    if let Some(v) = args.count_high {
        thresholds.count.high = v;
    }
    if let Some(v) = args.count_medium {
        thresholds.count.medium = v;
    }

    let theme = Theme::from_mode(settings.theme);

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&args.file, &export_path, &thresholds);
    }

    // Handle TCP connection mode
    if let Some(ref addr) = args.connect {
        return run_with_tcp(addr, thresholds, theme);
    }

    // Handle sample mode (generated data)
    if args.sample {
        let source = Box::new(SampleSource::new(Duration::from_secs(args.refresh)));
        return run_tui(source, thresholds, theme, Duration::from_millis(100));
    }

    // Default: file-based mode
    run_with_file(&args.file, thresholds, theme, Duration::from_secs(args.refresh))
}

/// Run with a file-based data source
fn run_with_file(
    path: &PathBuf,
    thresholds: data::Thresholds,
    theme: Theme,
    refresh: Duration,
) -> Result<()> {
    let source = Box::new(FileSource::new(path));
    run_tui(source, thresholds, theme, refresh)
}

/// Run with a TCP stream data source
fn run_with_tcp(addr: &str, thresholds: data::Thresholds, theme: Theme) -> Result<()> {
    // Build a tokio runtime for the TCP connection
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                println!("Connected!");
                Ok(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn DataSource>)
            }
            Err(e) => Err(anyhow::anyhow!("Failed to connect to {}: {}", addr, e)),
        }
    })?;

    // For TCP, we poll continuously (no refresh interval needed)
    run_tui(source, thresholds, theme, Duration::from_millis(100))
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    thresholds: data::Thresholds,
    theme: Theme,
    refresh_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app and load initial data
    let mut app = App::new(source, thresholds, theme);
    let _ = app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                frame.render_widget(paragraph, undersized_banner_area(area));
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with network health
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Providers => ui::providers::render(frame, app, chunks[2]),
                View::Categories => ui::categories::render(frame, app, chunks[2]),
                View::System => ui::system::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render detail overlay if active
            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh data periodically
        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Centered area for the terminal-too-small banner.
///
/// Stays within `area` even when the terminal is shorter than the
/// banner itself.
fn undersized_banner_area(area: Rect) -> Rect {
    let height = area.height.min(5);
    let y = area.y + (area.height / 2).saturating_sub(2).min(area.height - height);
    Rect::new(area.x, y, area.width, height)
}

/// Export current network state to a JSON file
fn export_to_file(
    network_path: &std::path::Path,
    export_path: &std::path::Path,
    thresholds: &data::Thresholds,
) -> Result<()> {
    use std::io::Write;

    let network_data = data::NetworkData::load(network_path, thresholds)?;

    // Build export structure
    let mut export = serde_json::Map::new();

    // Summary
    let mut summary = serde_json::Map::new();
    summary.insert(
        "total_providers".to_string(),
        serde_json::json!(network_data.providers.len()),
    );

    let (high, medium, low) = network_data.provider_status_counts();
    summary.insert("high".to_string(), serde_json::json!(high));
    summary.insert("medium".to_string(), serde_json::json!(medium));
    summary.insert("low".to_string(), serde_json::json!(low));

    summary.insert(
        "total_stations".to_string(),
        serde_json::json!(network_data.total_stations()),
    );
    summary.insert(
        "total_expected_rate".to_string(),
        serde_json::json!(network_data.total_expected_rate()),
    );
    summary.insert(
        "total_actual_rate".to_string(),
        serde_json::json!(network_data.total_actual_rate()),
    );
    summary.insert(
        "overall_percent".to_string(),
        serde_json::json!(network_data.overall.percent),
    );
    summary.insert(
        "overall_status".to_string(),
        serde_json::json!(network_data.overall.status.label()),
    );

    export.insert("summary".to_string(), serde_json::Value::Object(summary));

    // Providers
    let providers: Vec<serde_json::Value> = network_data
        .providers
        .iter()
        .map(|p| {
            serde_json::json!({
                "name": p.name,
                "stations": p.stations,
                "expected_rate": p.expected_rate,
                "actual_rate": p.actual_rate,
                "percent": p.percent,
                "status": p.status.label(),
                "coverage": p.coverage.label(),
                "lat": p.lat,
                "lon": p.lon
            })
        })
        .collect();
    export.insert("providers".to_string(), serde_json::Value::Array(providers));

    // Categories
    let categories: Vec<serde_json::Value> = network_data
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

    // Write to file
    let json = serde_json::to_string_pretty(&serde_json::Value::Object(export))?;
    let mut file = std::fs::File::create(export_path)?;
    file.write_all(json.as_bytes())?;

    println!("Exported network state to: {}", export_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_area_fits_short_terminal() {
        // Wide but only three rows tall still yields an in-bounds area
        let area = Rect::new(0, 0, 60, 3);
        let banner = undersized_banner_area(area);
        assert_eq!(banner.y, 0);
        assert!(banner.bottom() <= area.bottom());

        let area = Rect::new(0, 0, 80, 1);
        let banner = undersized_banner_area(area);
        assert_eq!(banner.height, 1);
        assert!(banner.bottom() <= area.bottom());
    }

    #[test]
    fn test_banner_area_centered_when_room() {
        let area = Rect::new(0, 0, 50, 11);
        let banner = undersized_banner_area(area);
        assert_eq!(banner.height, 5);
        assert_eq!(banner.y, 3);
        assert!(banner.bottom() <= area.bottom());
    }
}
