//! Data source abstraction for receiving network snapshots.
//!
//! This module provides a trait-based abstraction for receiving network
//! data from various sources (files, channels, network streams, or the
//! built-in sample generator).

mod channel;
mod file;
mod sample;
mod snapshot;
mod stream;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use sample::SampleSource;
pub use snapshot::{CategoryEntry, NetworkSnapshot, ProviderEntry, SystemEntry};
pub use stream::StreamSource;

use std::fmt::Debug;

/// Trait for receiving network data from various sources.
///
/// Implementations of this trait provide snapshots from different
/// backends: file polling, TCP streams, in-memory channels, or generated
/// sample data.
///
/// # Example
///
/// ```
/// use mesowatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("network.json");
/// if let Some(snapshot) = source.poll() {
///     println!("Got {} providers", snapshot.providers.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<NetworkSnapshot>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if an error occurred during the last poll.
    fn error(&self) -> Option<&str>;
}
