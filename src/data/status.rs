//! Status classification for ingestion and coverage metrics.
//!
//! The classifiers here are pure functions: a status is always recomputed
//! from the numeric value it derives from and never stored independently
//! of that value.

use serde::Deserialize;

/// Three-level health classification for a provider, category, or the
/// network as a whole.
///
/// Ordered so that `Low < Medium < High`; the worst status in a
/// collection is the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Low,
    Medium,
    High,
}

impl Status {
    /// Returns a short symbol for table cells.
    pub fn symbol(&self) -> &'static str {
        match self {
            Status::High => "HIGH",
            Status::Medium => "MED",
            Status::Low => "LOW",
        }
    }

    /// Returns the full lowercase label, as used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Status::High => "high",
            Status::Medium => "medium",
            Status::Low => "low",
        }
    }
}

/// Percentage of `expected` that `actual` represents.
///
/// A zero (or negative) baseline yields exactly `0.0` by definition,
/// never NaN or infinity.
pub fn percent_of(actual: f64, expected: f64) -> f64 {
    if expected > 0.0 {
        100.0 * actual / expected
    } else {
        0.0
    }
}

/// Thresholds for classifying a completeness percentage.
///
/// Used for ingestion-completeness and availability metrics.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PercentScheme {
    /// Percentage at or above which the status is High.
    pub high: f64,
    /// Percentage at or above which the status is Medium.
    pub medium: f64,
}

impl Default for PercentScheme {
    fn default() -> Self {
        Self {
            high: 98.0,
            medium: 90.0,
        }
    }
}

impl PercentScheme {
    /// Classify a percentage. Anything below `medium` (including negative
    /// values) falls through to Low.
    pub fn classify(&self, percent: f64) -> Status {
        if percent >= self.high {
            Status::High
        } else if percent >= self.medium {
            Status::Medium
        } else {
            Status::Low
        }
    }

    /// Aggregate a collection of (expected, actual) pairs into a single
    /// network-wide percentage and classify it.
    ///
    /// The percentage is `sum(actual) / sum(expected)` with the same
    /// zero-baseline rule as [`percent_of`].
    pub fn rollup<I>(&self, records: I) -> Rollup
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut expected = 0.0;
        let mut actual = 0.0;
        for (e, a) in records {
            expected += e;
            actual += a;
        }
        let percent = percent_of(actual, expected);
        Rollup {
            percent,
            status: self.classify(percent),
        }
    }
}

/// Thresholds for classifying a raw count, used for station coverage.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CountScheme {
    /// Count at or above which the status is High.
    pub high: u64,
    /// Count at or above which the status is Medium.
    pub medium: u64,
}

impl Default for CountScheme {
    fn default() -> Self {
        Self {
            high: 100,
            medium: 50,
        }
    }
}

impl CountScheme {
    /// Classify a count. Takes `i64` so negative input classifies as Low
    /// rather than being unrepresentable.
    pub fn classify(&self, count: i64) -> Status {
        if count >= self.high as i64 {
            Status::High
        } else if count >= self.medium as i64 {
            Status::Medium
        } else {
            Status::Low
        }
    }
}

/// Inverted thresholds for resource utilization gauges, where a low
/// percentage is the good case.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UsageScheme {
    /// Utilization at or above which the status degrades to Medium.
    pub warning: f64,
    /// Utilization at or above which the status degrades to Low.
    pub critical: f64,
}

impl Default for UsageScheme {
    fn default() -> Self {
        Self {
            warning: 70.0,
            critical: 90.0,
        }
    }
}

impl UsageScheme {
    /// Classify a utilization percentage. High means comfortable headroom.
    pub fn classify(&self, usage: f64) -> Status {
        if usage >= self.critical {
            Status::Low
        } else if usage >= self.warning {
            Status::Medium
        } else {
            Status::High
        }
    }
}

/// The full set of classification thresholds threaded through data
/// processing.
///
/// Both threshold schemes are configuration, not constants: they can be
/// overridden from the settings file or the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Percentage scheme for ingestion completeness.
    pub percent: PercentScheme,
    /// Count scheme for station coverage.
    pub count: CountScheme,
    /// Inverted scheme for system resource gauges.
    pub usage: UsageScheme,
}

/// Aggregate classification result for a collection of records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rollup {
    pub percent: f64,
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_basic() {
        assert_eq!(percent_of(80.0, 100.0), 80.0);
        assert_eq!(percent_of(100.0, 100.0), 100.0);
    }

    #[test]
    fn test_percent_of_zero_baseline() {
        // Defined as 0, not NaN and not an error
        assert_eq!(percent_of(50.0, 0.0), 0.0);
        assert_eq!(percent_of(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_percent_scheme_boundaries() {
        let scheme = PercentScheme::default();
        assert_eq!(scheme.classify(100.0), Status::High);
        assert_eq!(scheme.classify(98.0), Status::High);
        assert_eq!(scheme.classify(97.999), Status::Medium);
        assert_eq!(scheme.classify(90.0), Status::Medium);
        assert_eq!(scheme.classify(89.999), Status::Low);
        assert_eq!(scheme.classify(0.0), Status::Low);
    }

    #[test]
    fn test_percent_scheme_negative_input() {
        let scheme = PercentScheme::default();
        assert_eq!(scheme.classify(-5.0), Status::Low);
    }

    #[test]
    fn test_count_scheme_boundaries() {
        let scheme = CountScheme::default();
        assert_eq!(scheme.classify(150), Status::High);
        assert_eq!(scheme.classify(100), Status::High);
        assert_eq!(scheme.classify(99), Status::Medium);
        assert_eq!(scheme.classify(50), Status::Medium);
        assert_eq!(scheme.classify(49), Status::Low);
        assert_eq!(scheme.classify(0), Status::Low);
        assert_eq!(scheme.classify(-1), Status::Low);
    }

    #[test]
    fn test_usage_scheme() {
        let scheme = UsageScheme::default();
        assert_eq!(scheme.classify(45.0), Status::High);
        assert_eq!(scheme.classify(70.0), Status::Medium);
        assert_eq!(scheme.classify(90.0), Status::Low);
    }

    #[test]
    fn test_rollup() {
        let scheme = PercentScheme::default();
        let result = scheme.rollup(vec![(100.0, 100.0), (100.0, 80.0)]);
        assert_eq!(result.percent, 90.0);
        assert_eq!(result.status, Status::Medium);
    }

    #[test]
    fn test_rollup_zero_baseline() {
        let scheme = PercentScheme::default();
        let result = scheme.rollup(vec![(0.0, 0.0)]);
        assert_eq!(result.percent, 0.0);
        assert_eq!(result.status, Status::Low);

        let empty = scheme.rollup(Vec::new());
        assert_eq!(empty.percent, 0.0);
        assert_eq!(empty.status, Status::Low);
    }

    #[test]
    fn test_classifier_is_deterministic() {
        let scheme = PercentScheme::default();
        assert_eq!(scheme.classify(95.5), scheme.classify(95.5));
    }

    #[test]
    fn test_status_ordering() {
        // Worst-first sorting relies on this ordering
        assert!(Status::Low < Status::Medium);
        assert!(Status::Medium < Status::High);
        let worst = [Status::High, Status::Low, Status::Medium]
            .into_iter()
            .min()
            .unwrap();
        assert_eq!(worst, Status::Low);
    }

    #[test]
    fn test_custom_thresholds() {
        let scheme = PercentScheme {
            high: 99.5,
            medium: 95.0,
        };
        assert_eq!(scheme.classify(99.0), Status::Medium);
        assert_eq!(scheme.classify(99.5), Status::High);

        let counts = CountScheme {
            high: 10,
            medium: 5,
        };
        assert_eq!(counts.classify(7), Status::Medium);
    }
}
