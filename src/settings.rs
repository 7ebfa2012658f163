//! Settings loading.
//!
//! Thresholds and theme selection are configuration, not constants. They
//! are loaded once at startup from an optional TOML file plus
//! `MESOWATCH_`-prefixed environment variables, and the resulting value
//! is passed down explicitly; nothing here is recomputed or cached as a
//! side effect of module loading.
//!
//! ```toml
//! theme = "dark"
//!
//! [thresholds.percent]
//! high = 98.0
//! medium = 90.0
//!
//! [thresholds.count]
//! high = 100
//! medium = 50
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::Thresholds;

/// Theme selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect from terminal background luminance.
    #[default]
    Auto,
    Light,
    Dark,
}

/// Process-wide settings, loaded once at startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub thresholds: Thresholds,
    pub theme: ThemeMode,
}

impl Settings {
    /// Load settings from an optional file and the environment.
    ///
    /// Environment variables use a double-underscore separator, e.g.
    /// `MESOWATCH_THRESHOLDS__PERCENT__HIGH=99`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("MESOWATCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read settings")?;

        config.try_deserialize().context("invalid settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.thresholds.percent.high, 98.0);
        assert_eq!(settings.thresholds.percent.medium, 90.0);
        assert_eq!(settings.thresholds.count.high, 100);
        assert_eq!(settings.thresholds.count.medium, 50);
        assert_eq!(settings.theme, ThemeMode::Auto);
    }

    #[test]
    fn test_load_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.thresholds.percent.high, 98.0);
    }

    #[test]
    fn test_environment_overrides() {
        // Use the usage scheme so parallel tests reading other settings
        // fields are unaffected
        std::env::set_var("MESOWATCH_THRESHOLDS__USAGE__CRITICAL", "95");
        let settings = Settings::load(None).unwrap();
        std::env::remove_var("MESOWATCH_THRESHOLDS__USAGE__CRITICAL");

        assert_eq!(settings.thresholds.usage.critical, 95.0);
        // Untouched values keep their defaults
        assert_eq!(settings.thresholds.usage.warning, 70.0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
theme = "dark"

[thresholds.percent]
high = 99.5

[thresholds.count]
medium = 25
"#
        )
        .unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.thresholds.percent.high, 99.5);
        // Unset values keep their defaults
        assert_eq!(settings.thresholds.percent.medium, 90.0);
        assert_eq!(settings.thresholds.count.medium, 25);
        assert_eq!(settings.thresholds.count.high, 100);
    }
}
