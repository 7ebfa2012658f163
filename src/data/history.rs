//! Historical rate tracking for sparklines and trend indicators.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use super::network::NetworkData;

/// Maximum number of historical samples to keep per provider.
const MAX_HISTORY_SIZE: usize = 60;

/// Tracks per-provider ingestion rates over time.
///
/// Records a sample on every snapshot to enable the trend sparklines in
/// the provider table and detail overlay.
#[derive(Debug, Clone)]
pub struct History {
    /// Historical actual rates per provider (provider name -> samples).
    pub provider_rates: HashMap<String, VecDeque<f64>>,
    /// Timestamps of samples for rate-of-change calculations.
    pub timestamps: VecDeque<Instant>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            provider_rates: HashMap::new(),
            timestamps: VecDeque::new(),
        }
    }

    /// Record a new data snapshot
    pub fn record(&mut self, data: &NetworkData) {
        for provider in &data.providers {
            let rates = self.provider_rates.entry(provider.name.clone()).or_default();
            rates.push_back(provider.actual_rate);
            if rates.len() > MAX_HISTORY_SIZE {
                rates.pop_front();
            }
        }

        self.timestamps.push_back(data.last_updated);
        if self.timestamps.len() > MAX_HISTORY_SIZE {
            self.timestamps.pop_front();
        }
    }

    /// Get sparkline data for a provider's rate (normalized to 0-7 for
    /// 8 bar levels).
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn rate_sparkline(&self, provider_name: &str) -> Vec<u8> {
        let Some(values) = self.provider_rates.get(provider_name) else {
            return Vec::new();
        };

        if values.len() < 2 {
            return Vec::new();
        }

        // Rates are absolute (records/hr), so normalize the raw values
        // over the observed min..max range
        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let min = values.iter().copied().fold(f64::MAX, f64::min);
        let range = (max - min).max(f64::EPSILON);

        values
            .iter()
            .map(|&v| {
                let normalized = ((v - min) / range * 7.0) as u8;
                normalized.min(7)
            })
            .collect()
    }

    /// Get the change in a provider's rate between the last two samples,
    /// in records/hr per second of wall time.
    ///
    /// Returns None if there's not enough history.
    pub fn rate_delta(&self, provider_name: &str) -> Option<f64> {
        let rates = self.provider_rates.get(provider_name)?;
        if rates.len() < 2 || self.timestamps.len() < 2 {
            return None;
        }

        let current = *rates.back()?;
        let previous = *rates.get(rates.len() - 2)?;

        let current_time = self.timestamps.back()?;
        let previous_time = self.timestamps.get(self.timestamps.len() - 2)?;
        let elapsed = current_time.duration_since(*previous_time).as_secs_f64();

        if elapsed > 0.0 {
            Some((current - previous) / elapsed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{NetworkData, Thresholds};
    use crate::source::{NetworkSnapshot, ProviderEntry};
    use std::collections::BTreeMap;

    fn snapshot_with_rate(rate: f64) -> NetworkData {
        let mut providers = BTreeMap::new();
        providers.insert(
            "NOAA".to_string(),
            ProviderEntry {
                expected_rate: 1000.0,
                actual_rate: rate,
                ..Default::default()
            },
        );
        let snapshot = NetworkSnapshot {
            providers,
            ..Default::default()
        };
        NetworkData::from_snapshot(snapshot, &Thresholds::default())
    }

    #[test]
    fn test_sparkline_needs_two_samples() {
        let mut history = History::new();
        assert!(history.rate_sparkline("NOAA").is_empty());

        history.record(&snapshot_with_rate(900.0));
        assert!(history.rate_sparkline("NOAA").is_empty());

        history.record(&snapshot_with_rate(950.0));
        let sparkline = history.rate_sparkline("NOAA");
        assert_eq!(sparkline.len(), 2);
        // Min maps to 0, max to 7
        assert_eq!(sparkline[0], 0);
        assert_eq!(sparkline[1], 7);
    }

    #[test]
    fn test_sparkline_flat_rates() {
        let mut history = History::new();
        history.record(&snapshot_with_rate(500.0));
        history.record(&snapshot_with_rate(500.0));

        let sparkline = history.rate_sparkline("NOAA");
        assert!(sparkline.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        for i in 0..200 {
            history.record(&snapshot_with_rate(i as f64));
        }
        assert_eq!(history.provider_rates["NOAA"].len(), MAX_HISTORY_SIZE);
        assert_eq!(history.timestamps.len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_rate_delta_unknown_provider() {
        let history = History::new();
        assert!(history.rate_delta("nope").is_none());
    }
}
