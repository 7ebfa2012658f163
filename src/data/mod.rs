//! Data models and processing for network snapshots.
//!
//! This module handles the transformation of raw gateway snapshots into
//! structured, status-annotated data suitable for display.
//!
//! ## Submodules
//!
//! - [`status`]: The status classifier and aggregate rollup ([`Status`], threshold schemes)
//! - [`network`]: Processed data models ([`NetworkData`], [`ProviderData`], [`CategoryData`])
//! - [`history`]: Historical rate tracking for sparklines
//!
//! ## Data Flow
//!
//! ```text
//! NetworkSnapshot (raw JSON)
//!        │
//!        ▼
//! NetworkData::from_snapshot()
//!        │
//!        ├──▶ ProviderData / CategoryData (status computed from Thresholds)
//!        │
//!        └──▶ History::record() (for sparklines)
//! ```

pub mod history;
pub mod network;
pub mod status;

pub use history::History;
pub use network::{CategoryData, NetworkData, ProviderData, SystemStats};
pub use status::{
    percent_of, CountScheme, PercentScheme, Rollup, Status, Thresholds, UsageScheme,
};
