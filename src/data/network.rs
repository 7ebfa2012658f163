//! Network data parsing and status computation.
//!
//! This module transforms raw gateway snapshots into processed data with
//! ingestion and coverage status computed from configurable thresholds.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use super::status::{percent_of, Rollup, Status, Thresholds};
use crate::source::{CategoryEntry, NetworkSnapshot, ProviderEntry, SystemEntry};

/// Processed provider record with computed percentages and status.
///
/// `percent` and `status` are derived from the rate fields, `coverage`
/// from the station count. All three are recomputed on every snapshot;
/// nothing is carried over between passes.
#[derive(Debug, Clone)]
pub struct ProviderData {
    pub name: String,
    pub expected_rate: f64,
    pub actual_rate: f64,
    pub stations: u64,
    /// Ingestion completeness, `100 * actual / expected` (0 if no baseline).
    pub percent: f64,
    /// Ingestion status from the percentage scheme.
    pub status: Status,
    /// Coverage status from the station-count scheme.
    pub coverage: Status,
    pub lat: f64,
    pub lon: f64,
}

/// Processed category record with computed percentage and status.
#[derive(Debug, Clone)]
pub struct CategoryData {
    pub name: String,
    pub expected: f64,
    pub actual: f64,
    pub percent: f64,
    pub status: Status,
}

/// Gateway resource statistics plus derived ingestion totals.
#[derive(Debug, Clone, Default)]
pub struct SystemStats {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub storage_percent: f64,
    pub network_in_mbps: f64,
    pub network_out_mbps: f64,
    pub latency_seconds: f64,
    /// Sum of category actuals for the last hour.
    pub ingested: f64,
    pub exported: f64,
    pub uptime_seconds: u64,
}

/// Complete processed network data ready for display.
#[derive(Debug, Clone)]
pub struct NetworkData {
    pub providers: Vec<ProviderData>,
    pub categories: Vec<CategoryData>,
    pub system: SystemStats,
    /// Network-wide rollup over all categories.
    pub overall: Rollup,
    pub last_updated: Instant,
}

impl NetworkData {
    /// Load and parse network data from a JSON file.
    pub fn load(path: &Path, thresholds: &Thresholds) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, thresholds)
    }

    /// Parse network data from a JSON string.
    pub fn parse(content: &str, thresholds: &Thresholds) -> Result<Self> {
        let snapshot: NetworkSnapshot = serde_json::from_str(content)?;
        Ok(Self::from_snapshot(snapshot, thresholds))
    }

    /// Convert a raw snapshot into processed data.
    ///
    /// This is the primary conversion method used by all data sources.
    /// Records are built fresh on every call.
    pub fn from_snapshot(snapshot: NetworkSnapshot, thresholds: &Thresholds) -> Self {
        let mut providers: Vec<ProviderData> = snapshot
            .providers
            .into_iter()
            .map(|(name, entry)| Self::parse_provider(name, entry, thresholds))
            .collect();

        let mut categories: Vec<CategoryData> = snapshot
            .categories
            .into_iter()
            .map(|(name, entry)| Self::parse_category(name, entry, thresholds))
            .collect();

        // Sort worst status first, then by name
        providers.sort_by(|a, b| a.status.cmp(&b.status).then_with(|| a.name.cmp(&b.name)));
        categories.sort_by(|a, b| a.status.cmp(&b.status).then_with(|| a.name.cmp(&b.name)));

        let overall = thresholds
            .percent
            .rollup(categories.iter().map(|c| (c.expected, c.actual)));

        let system = Self::parse_system(snapshot.system, &categories);

        Self {
            providers,
            categories,
            system,
            overall,
            last_updated: Instant::now(),
        }
    }

    fn parse_provider(name: String, entry: ProviderEntry, thresholds: &Thresholds) -> ProviderData {
        let percent = percent_of(entry.actual_rate, entry.expected_rate);
        ProviderData {
            name,
            expected_rate: entry.expected_rate,
            actual_rate: entry.actual_rate,
            stations: entry.stations,
            percent,
            status: thresholds.percent.classify(percent),
            coverage: thresholds.count.classify(entry.stations as i64),
            lat: entry.lat,
            lon: entry.lon,
        }
    }

    fn parse_category(name: String, entry: CategoryEntry, thresholds: &Thresholds) -> CategoryData {
        let percent = percent_of(entry.actual, entry.expected);
        CategoryData {
            name,
            expected: entry.expected,
            actual: entry.actual,
            percent,
            status: thresholds.percent.classify(percent),
        }
    }

    fn parse_system(entry: SystemEntry, categories: &[CategoryData]) -> SystemStats {
        let ingested = categories.iter().map(|c| c.actual).sum();
        SystemStats {
            cpu_percent: entry.cpu_percent,
            memory_percent: entry.memory_percent,
            storage_percent: entry.storage_percent,
            network_in_mbps: entry.network_in_mbps,
            network_out_mbps: entry.network_out_mbps,
            latency_seconds: entry.latency_seconds,
            ingested,
            exported: entry.exported,
            uptime_seconds: entry.uptime_seconds,
        }
    }

    /// Count providers by ingestion status: (high, medium, low).
    pub fn provider_status_counts(&self) -> (usize, usize, usize) {
        let mut high = 0;
        let mut medium = 0;
        let mut low = 0;
        for provider in &self.providers {
            match provider.status {
                Status::High => high += 1,
                Status::Medium => medium += 1,
                Status::Low => low += 1,
            }
        }
        (high, medium, low)
    }

    /// Total expected records per hour across all providers.
    pub fn total_expected_rate(&self) -> f64 {
        self.providers.iter().map(|p| p.expected_rate).sum()
    }

    /// Total actual records per hour across all providers.
    pub fn total_actual_rate(&self) -> f64 {
        self.providers.iter().map(|p| p.actual_rate).sum()
    }

    /// Total stations across all providers.
    pub fn total_stations(&self) -> u64 {
        self.providers.iter().map(|p| p.stations).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::status::Status;
    use std::collections::BTreeMap;

    fn sample_snapshot() -> NetworkSnapshot {
        let mut providers = BTreeMap::new();
        providers.insert(
            "NOAA".to_string(),
            ProviderEntry {
                expected_rate: 45000.0,
                actual_rate: 44800.0,
                stations: 120,
                lat: 39.5,
                lon: -98.35,
            },
        );
        providers.insert(
            "OK Mesonet".to_string(),
            ProviderEntry {
                expected_rate: 15000.0,
                actual_rate: 12900.0,
                stations: 42,
                lat: 35.5,
                lon: -97.5,
            },
        );

        let mut categories = BTreeMap::new();
        categories.insert(
            "Ground Stations".to_string(),
            CategoryEntry {
                expected: 100.0,
                actual: 100.0,
            },
        );
        categories.insert(
            "Balloons".to_string(),
            CategoryEntry {
                expected: 100.0,
                actual: 80.0,
            },
        );

        NetworkSnapshot {
            providers,
            categories,
            system: SystemEntry::default(),
        }
    }

    #[test]
    fn test_from_snapshot_classifies_providers() {
        let data = NetworkData::from_snapshot(sample_snapshot(), &Thresholds::default());
        assert_eq!(data.providers.len(), 2);

        // Worst status first: OK Mesonet at 86% / 42 stations
        let mesonet = &data.providers[0];
        assert_eq!(mesonet.name, "OK Mesonet");
        assert_eq!(mesonet.status, Status::Low);
        assert_eq!(mesonet.coverage, Status::Low);

        let noaa = &data.providers[1];
        assert_eq!(noaa.name, "NOAA");
        assert_eq!(noaa.status, Status::High);
        assert_eq!(noaa.coverage, Status::High);
        assert!((noaa.percent - 99.555).abs() < 0.01);
    }

    #[test]
    fn test_from_snapshot_overall_rollup() {
        let data = NetworkData::from_snapshot(sample_snapshot(), &Thresholds::default());
        // Categories: (100, 100) + (100, 80) -> 90.0% -> Medium
        assert_eq!(data.overall.percent, 90.0);
        assert_eq!(data.overall.status, Status::Medium);
        assert_eq!(data.system.ingested, 180.0);
    }

    #[test]
    fn test_zero_baseline_provider_is_low() {
        let mut providers = BTreeMap::new();
        providers.insert(
            "Silent".to_string(),
            ProviderEntry {
                expected_rate: 0.0,
                actual_rate: 500.0,
                ..Default::default()
            },
        );
        let snapshot = NetworkSnapshot {
            providers,
            ..Default::default()
        };

        let data = NetworkData::from_snapshot(snapshot, &Thresholds::default());
        let silent = &data.providers[0];
        assert_eq!(silent.percent, 0.0);
        assert_eq!(silent.status, Status::Low);
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        let json = r#"{
            "providers": { "Sparse": {} },
            "categories": { "Buoys": { "expected": 75 } }
        }"#;

        let data = NetworkData::parse(json, &Thresholds::default()).unwrap();
        assert_eq!(data.providers[0].percent, 0.0);
        assert_eq!(data.providers[0].status, Status::Low);

        // actual missing -> 0 -> 0% -> Low
        assert_eq!(data.categories[0].percent, 0.0);
        assert_eq!(data.categories[0].status, Status::Low);
    }

    #[test]
    fn test_status_counts_and_totals() {
        let data = NetworkData::from_snapshot(sample_snapshot(), &Thresholds::default());
        assert_eq!(data.provider_status_counts(), (1, 0, 1));
        assert_eq!(data.total_expected_rate(), 60000.0);
        assert_eq!(data.total_actual_rate(), 57700.0);
        assert_eq!(data.total_stations(), 162);
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        assert!(NetworkData::parse("not json", &Thresholds::default()).is_err());
    }
}
