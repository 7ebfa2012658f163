// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # mesowatch
//!
//! An operational TUI and library for monitoring mesonet provider coverage
//! and record ingestion.
//!
//! This crate provides tools for watching the health of a meteorological
//! observation network: which providers are reporting, how complete their
//! record streams are against expected rates, and how the ingest gateway
//! itself is holding up. It can receive network snapshots from various
//! sources (files, channels, network streams, generated samples) and
//! display them in an interactive terminal UI.
//!
//! ## Architecture
//!
//! The crate is organized into five main modules:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Application                           │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(processing)   │(rendering)   │         │  │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘  │
//! │       │                                                      │
//! │       ▼                                                      │
//! │  ┌─────────┐        FileSource | StreamSource               │
//! │  │ source  │◀──     ChannelSource | SampleSource            │
//! │  │ (input) │                                                 │
//! │  └─────────┘                                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with implementations
//!   for file polling, TCP streams, channel-based input, and generated samples
//! - **[`data`]**: Data models and processing - classifies raw snapshots into
//!   status-annotated [`NetworkData`] and tracks rate history for sparklines
//! - **[`settings`]**: Layered configuration (TOML file plus environment overrides)
//! - **[`ui`]**: Terminal rendering using ratatui - provider and category tables,
//!   system gauges, and theme support
//!
//! ## Features
//!
//! - **Providers view**: Per-provider coverage and ingestion completeness
//! - **Categories view**: Per-category record counts with a network-wide rollup
//! - **System view**: Ingest gateway resource gauges and throughput
//! - **Historical tracking**: Sparklines and rate deltas per provider
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Monitor a JSON file (produced by the ingest gateway)
//! mesowatch --file network.json
//!
//! # Monitor via TCP connection
//! mesowatch --connect localhost:9090
//!
//! # Demo with generated data
//! mesowatch --sample
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use mesowatch::{App, FileSource, Theme, Thresholds};
//!
//! let source = Box::new(FileSource::new("network.json"));
//! let app = App::new(source, Thresholds::default(), Theme::dark());
//! ```
//!
//! ### As a library with stream source (TCP, etc.)
//!
//! ```no_run
//! use std::io::Cursor;
//! use mesowatch::{App, StreamSource, Theme, Thresholds};
//!
//! # tokio_test::block_on(async {
//! // Example with a cursor (in practice, use TcpStream)
//! let data = b"{}\n";
//! let stream = Cursor::new(data.to_vec());
//! let source = StreamSource::spawn(stream, "example");
//! let app = App::new(Box::new(source), Thresholds::default(), Theme::dark());
//! # });
//! ```
//!
//! ### As a library with channel source (for gateway integration)
//!
//! ```
//! use mesowatch::{App, ChannelSource, Theme, Thresholds};
//!
//! // Create a channel for receiving snapshots
//! let (tx, source) = ChannelSource::create("gateway://ingest-1");
//!
//! // Create the app
//! let app = App::new(Box::new(source), Thresholds::default(), Theme::dark());
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{
    percent_of, CategoryData, CountScheme, History, NetworkData, PercentScheme, ProviderData,
    Rollup, Status, SystemStats, Thresholds, UsageScheme,
};
pub use settings::{Settings, ThemeMode};
pub use source::{
    CategoryEntry, ChannelSource, DataSource, FileSource, NetworkSnapshot, ProviderEntry,
    SampleSource, StreamSource, SystemEntry,
};
pub use ui::Theme;
