//! Channel-based data source.
//!
//! Receives network snapshots via a tokio watch channel. This is useful
//! for embedding the TUI behind another ingestion component that pushes
//! snapshots rather than writing them to a file.

use tokio::sync::watch;

use super::{DataSource, NetworkSnapshot};

/// A data source that receives network snapshots via a channel.
///
/// The producer (e.g., a gateway subscriber task) sends snapshots
/// through the channel, and this source provides them to the TUI.
///
/// # Example
///
/// ```
/// use mesowatch::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("gateway://ingest-1");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<NetworkSnapshot>,
    description: String,
    /// Track if we've returned the initial value yet
    initial_returned: bool,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where snapshots come from
    ///   (e.g., "gateway://ingest-1")
    pub fn new(receiver: watch::Receiver<NetworkSnapshot>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair for sending snapshots to a ChannelSource.
    ///
    /// Returns (sender, source) where the sender can be used to push
    /// snapshots and the source can be used with the TUI.
    pub fn create(source_description: &str) -> (watch::Sender<NetworkSnapshot>, Self) {
        let (tx, rx) = watch::channel(NetworkSnapshot::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<NetworkSnapshot> {
        // Return the initial value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        // Check if there's a new value without blocking
        if self.receiver.has_changed().unwrap_or(false) {
            let snapshot = self.receiver.borrow_and_update().clone();
            Some(snapshot)
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // Channel sources don't have file-based errors; a dropped sender
        // simply stops producing new values
        None
    }
}
