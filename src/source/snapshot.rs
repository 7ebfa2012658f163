//! Shared types for network snapshots.
//!
//! These types match the JSON published by a mesonet ingest gateway. They
//! are the common data format between the gateway producer and this
//! viewer consumer.
//!
//! All numeric fields are defaulted on deserialization: a record with a
//! missing field is treated as reporting zero, not rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A complete snapshot of network state.
///
/// Maps provider and category names to their reported figures, plus the
/// gateway's own resource statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Provider figures, keyed by provider name.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderEntry>,
    /// Observation category figures, keyed by category name.
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryEntry>,
    /// Gateway resource statistics.
    #[serde(default)]
    pub system: SystemEntry,
}

impl NetworkSnapshot {
    /// True if the snapshot carries no provider or category figures.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty() && self.categories.is_empty()
    }
}

/// Reported figures for a single provider (data vendor).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// Baseline records per hour this provider should deliver.
    #[serde(default)]
    pub expected_rate: f64,

    /// Records per hour actually received over the last hour.
    #[serde(default)]
    pub actual_rate: f64,

    /// Number of stations the provider currently operates.
    #[serde(default)]
    pub stations: u64,

    /// Latitude of the provider's coverage centroid.
    #[serde(default)]
    pub lat: f64,

    /// Longitude of the provider's coverage centroid.
    #[serde(default)]
    pub lon: f64,
}

/// Reported figures for an observation category (platform class).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Baseline records per hour for this category.
    #[serde(default)]
    pub expected: f64,

    /// Records received over the last hour.
    #[serde(default)]
    pub actual: f64,
}

/// Resource statistics reported by the ingest gateway itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemEntry {
    /// CPU utilization, 0-100.
    #[serde(default)]
    pub cpu_percent: f64,

    /// Memory utilization, 0-100.
    #[serde(default)]
    pub memory_percent: f64,

    /// Storage utilization, 0-100.
    #[serde(default)]
    pub storage_percent: f64,

    /// Inbound network throughput in Mbps.
    #[serde(default)]
    pub network_in_mbps: f64,

    /// Outbound network throughput in Mbps.
    #[serde(default)]
    pub network_out_mbps: f64,

    /// End-to-end ingestion latency in seconds.
    #[serde(default)]
    pub latency_seconds: f64,

    /// Records exported downstream over the last hour.
    #[serde(default)]
    pub exported: f64,

    /// Gateway uptime in seconds.
    #[serde(default)]
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{
            "providers": {
                "NOAA": {
                    "expected_rate": 45000,
                    "actual_rate": 44800,
                    "stations": 120,
                    "lat": 39.5,
                    "lon": -98.35
                }
            },
            "categories": {
                "Ground Stations": {
                    "expected": 9830,
                    "actual": 9720
                }
            },
            "system": {
                "cpu_percent": 62,
                "latency_seconds": 4.3
            }
        }"#;

        let snapshot: NetworkSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.providers.len(), 1);
        assert_eq!(snapshot.categories.len(), 1);

        let noaa = snapshot.providers.get("NOAA").unwrap();
        assert_eq!(noaa.expected_rate, 45000.0);
        assert_eq!(noaa.actual_rate, 44800.0);
        assert_eq!(noaa.stations, 120);

        let ground = snapshot.categories.get("Ground Stations").unwrap();
        assert_eq!(ground.expected, 9830.0);

        assert_eq!(snapshot.system.cpu_percent, 62.0);
        assert_eq!(snapshot.system.latency_seconds, 4.3);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let json = r#"{
            "providers": {
                "Sparse": { "stations": 12 }
            }
        }"#;

        let snapshot: NetworkSnapshot = serde_json::from_str(json).unwrap();
        let sparse = snapshot.providers.get("Sparse").unwrap();
        assert_eq!(sparse.expected_rate, 0.0);
        assert_eq!(sparse.actual_rate, 0.0);
        assert_eq!(sparse.stations, 12);
        assert!(snapshot.categories.is_empty());
        assert_eq!(snapshot.system.cpu_percent, 0.0);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot: NetworkSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }
}
