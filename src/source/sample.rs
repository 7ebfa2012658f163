//! Sample data source.
//!
//! Generates randomized demo snapshots for running the TUI without a
//! live gateway. Provider and category baselines follow the published
//! mesonet figures; actual rates and resource stats are jittered on
//! every refresh.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{CategoryEntry, DataSource, NetworkSnapshot, ProviderEntry, SystemEntry};

/// Demo providers: (name, expected records/hr, stations, lat, lon).
const PROVIDERS: &[(&str, f64, u64, f64, f64)] = &[
    ("NOAA", 45280.0, 152, 39.0, -95.0),
    ("ASOS", 32150.0, 117, 41.2, -98.7),
    ("NWS", 28970.0, 96, 38.5, -90.3),
    ("MADIS", 36420.0, 134, 36.1, -102.4),
    ("NSSL", 18640.0, 61, 35.2, -97.4),
    ("OK Mesonet", 15280.0, 42, 35.5, -97.5),
    ("USGS", 8750.0, 55, 40.7, -111.9),
    ("FAA", 12340.0, 103, 33.9, -118.4),
];

/// Demo categories: (name, expected records/hr).
const CATEGORIES: &[(&str, f64)] = &[
    ("Ground Stations", 9830.0),
    ("Fixed Buoys", 75.0),
    ("Drift Buoys", 95.0),
    ("Balloons", 200.0),
    ("ABO", 25.0),
    ("Dropsondes", 36.0),
];

/// A data source that fabricates a fresh snapshot on each refresh
/// interval.
///
/// Useful for demos and UI development: `mesowatch --sample`.
#[derive(Debug)]
pub struct SampleSource {
    description: String,
    interval: Duration,
    last_emit: Option<Instant>,
    started: Instant,
    rng: StdRng,
}

impl SampleSource {
    /// Create a sample source that emits a new snapshot every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self::with_seed(interval, rand::random())
    }

    /// Create a sample source with a fixed RNG seed, for reproducible
    /// output.
    pub fn with_seed(interval: Duration, seed: u64) -> Self {
        Self {
            description: "sample data".to_string(),
            interval,
            last_emit: None,
            started: Instant::now(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fabricate one snapshot.
    fn generate(&mut self) -> NetworkSnapshot {
        let mut snapshot = NetworkSnapshot::default();

        for &(name, expected, stations, lat, lon) in PROVIDERS {
            // Most providers hover near their baseline; dip occasionally
            let completeness = if self.rng.gen_bool(0.15) {
                self.rng.gen_range(0.80..0.95)
            } else {
                self.rng.gen_range(0.95..1.002)
            };
            snapshot.providers.insert(
                name.to_string(),
                ProviderEntry {
                    expected_rate: expected,
                    actual_rate: (expected * completeness).round(),
                    stations,
                    lat,
                    lon,
                },
            );
        }

        for &(name, expected) in CATEGORIES {
            let completeness = self.rng.gen_range(0.88..1.0);
            snapshot.categories.insert(
                name.to_string(),
                CategoryEntry {
                    expected,
                    actual: (expected * completeness).round(),
                },
            );
        }

        let ingested: f64 = snapshot.categories.values().map(|c| c.actual).sum();
        snapshot.system = SystemEntry {
            cpu_percent: self.rng.gen_range(60.0..85.0),
            memory_percent: self.rng.gen_range(65.0..90.0),
            storage_percent: self.rng.gen_range(50.0..75.0),
            network_in_mbps: self.rng.gen_range(40.0..120.0),
            network_out_mbps: self.rng.gen_range(20.0..80.0),
            latency_seconds: self.rng.gen_range(2.0..6.0),
            exported: ingested,
            uptime_seconds: self.started.elapsed().as_secs() + 1_058_400,
        };

        snapshot
    }
}

impl DataSource for SampleSource {
    fn poll(&mut self) -> Option<NetworkSnapshot> {
        let due = match self.last_emit {
            None => true,
            Some(last) => last.elapsed() >= self.interval,
        };

        if due {
            self.last_emit = Some(Instant::now());
            Some(self.generate())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_source_emits_immediately() {
        let mut source = SampleSource::with_seed(Duration::from_secs(60), 7);

        let snapshot = source.poll().expect("first poll should emit");
        assert_eq!(snapshot.providers.len(), PROVIDERS.len());
        assert_eq!(snapshot.categories.len(), CATEGORIES.len());

        // Not due again until the interval elapses
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_sample_values_in_range() {
        let mut source = SampleSource::with_seed(Duration::from_millis(0), 42);
        let snapshot = source.poll().unwrap();

        for (name, provider) in &snapshot.providers {
            assert!(provider.expected_rate > 0.0, "{} has no baseline", name);
            assert!(provider.actual_rate >= 0.0);
            assert!(provider.actual_rate <= provider.expected_rate * 1.01);
        }
        for category in snapshot.categories.values() {
            assert!(category.actual <= category.expected);
        }
        assert!(snapshot.system.cpu_percent >= 60.0 && snapshot.system.cpu_percent < 85.0);
        assert_eq!(
            snapshot.system.exported,
            snapshot.categories.values().map(|c| c.actual).sum::<f64>()
        );
    }

    #[test]
    fn test_sample_source_is_seeded() {
        let mut a = SampleSource::with_seed(Duration::from_millis(0), 99);
        let mut b = SampleSource::with_seed(Duration::from_millis(0), 99);

        let sa = a.poll().unwrap();
        let sb = b.poll().unwrap();
        for (name, pa) in &sa.providers {
            let pb = &sb.providers[name];
            assert_eq!(pa.actual_rate, pb.actual_rate);
        }
    }
}
