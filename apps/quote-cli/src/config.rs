//! # Quote Configuration
//!
//! Market defaults and rate tables for the CLI.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --fx-rate 1380 --fuel-pct 19 --margin 12                           │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     FREIGHT_FX_RATE=1380                                               │
//! │     FREIGHT_FUEL_SURCHARGE_PCT=19                                      │
//! │     FREIGHT_DEFAULT_MARGIN_PCT=12                                      │
//! │                                                                         │
//! │  3. TOML Config File (--config, else the per-user default)             │
//! │     ~/.config/freight-quote/freight-quote.toml (Linux)                 │
//! │                                                                         │
//! │  4. Built-in tariff and market defaults (lowest priority)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Flags are applied per request in the quote command, not here.
//!
//! ## Configuration File Format
//! ```toml
//! [market]
//! fx_rate = 1350.0
//! fuel_surcharge_pct = 18.0
//! margin_pct = 15.0
//!
//! [tables.margin]
//! rounding_increment = 1000
//!
//! [tables.domestic.region_rates]
//! SEOUL = [45000, 55000, 80000, 130000, 160000, 200000, 320000]
//! ```
//!
//! The file is overlaid on the built-in values key by key, so maps such as
//! `region_rates` or a carrier's `per_kg` only change the entries they name.
//! Lists (truck tiers, discount breaks, postal ranges) are replaced whole.

use std::path::{Path, PathBuf};

use freight_core::validation::{validate_fx_rate, validate_margin, validate_non_negative};
use freight_core::RateTables;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

pub const ENV_FX_RATE: &str = "FREIGHT_FX_RATE";
pub const ENV_FUEL_SURCHARGE_PCT: &str = "FREIGHT_FUEL_SURCHARGE_PCT";
pub const ENV_DEFAULT_MARGIN_PCT: &str = "FREIGHT_DEFAULT_MARGIN_PCT";

// =============================================================================
// Market Defaults
// =============================================================================

/// Values a request may leave out.
///
/// These move daily (FX, fuel index) or per salesperson (margin), so they
/// live in config rather than in every request file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDefaults {
    /// Local currency per USD.
    #[serde(default = "default_fx_rate")]
    pub fx_rate: f64,

    /// Carrier fuel surcharge, percent of base freight.
    #[serde(default = "default_fuel_surcharge_pct")]
    pub fuel_surcharge_pct: f64,

    /// Target margin, percent of revenue.
    #[serde(default = "default_margin_pct")]
    pub margin_pct: f64,
}

fn default_fx_rate() -> f64 {
    1_350.0
}

fn default_fuel_surcharge_pct() -> f64 {
    18.0
}

fn default_margin_pct() -> f64 {
    15.0
}

impl Default for MarketDefaults {
    fn default() -> Self {
        MarketDefaults {
            fx_rate: default_fx_rate(),
            fuel_surcharge_pct: default_fuel_surcharge_pct(),
            margin_pct: default_margin_pct(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Request defaults.
    #[serde(default)]
    pub market: MarketDefaults,

    /// Tariff tables handed to the engine.
    #[serde(default)]
    pub tables: RateTables,
}

impl QuoteConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`--config`, else the per-user default path)
    /// 3. Environment variables
    ///
    /// An explicit `--config` path that does not exist is an error; a
    /// missing default file is not.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading quote config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses config text, overlaying it on the built-in values.
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        let overrides: toml::Table = contents.parse()?;
        let toml::Value::Table(mut merged) = toml::Value::try_from(Self::default())? else {
            return Err(CliError::InvalidConfig(
                "built-in config did not render as a table".into(),
            ));
        };
        overlay(&mut merged, overrides);
        Ok(toml::Value::Table(merged).try_into()?)
    }

    /// Validates market defaults and tables.
    pub fn validate(&self) -> CliResult<()> {
        validate_fx_rate(self.market.fx_rate)?;
        validate_non_negative("fuel_surcharge_pct", self.market.fuel_surcharge_pct)?;
        validate_margin(self.market.margin_pct)?;
        if self.market.margin_pct >= 100.0 {
            return Err(CliError::InvalidConfig(format!(
                "default margin_pct must be below 100, got {}",
                self.market.margin_pct
            )));
        }

        self.tables.validate()?;
        Ok(())
    }

    /// Renders the config back to TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// logged and skipped.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let targets = [
            (ENV_FX_RATE, &mut self.market.fx_rate),
            (ENV_FUEL_SURCHARGE_PCT, &mut self.market.fuel_surcharge_pct),
            (ENV_DEFAULT_MARGIN_PCT, &mut self.market.margin_pct),
        ];

        for (key, slot) in targets {
            let Some(raw) = lookup(key) else { continue };
            match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    debug!(key, value, "Overriding market default from environment");
                    *slot = value;
                }
                _ => warn!(key, value = %raw, "Ignoring unparseable environment override"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "freight", "freight-quote")
            .map(|dirs| dirs.config_dir().join("freight-quote.toml"))
    }
}

/// Merges `overrides` into `base`. Tables merge recursively; any other
/// value replaces what was there.
fn overlay(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        let replacement = match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                overlay(existing, incoming);
                None
            }
            (_, value) => Some(value),
        };
        if let Some(value) = replacement {
            base.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = QuoteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.market.fx_rate, 1_350.0);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_config(
            r#"
[market]
fx_rate = 1400.0

[tables.margin]
rounding_increment = 1000
"#,
        );
        let config = QuoteConfig::from_file(file.path()).unwrap();

        assert_eq!(config.market.fx_rate, 1_400.0);
        assert_eq!(config.market.margin_pct, 15.0);
        assert_eq!(config.tables.margin.rounding_increment, 1_000);
        assert_eq!(config.tables.zones, RateTables::default().zones);
    }

    #[test]
    fn test_partial_maps_merge_with_built_in_entries() {
        let config = QuoteConfig::from_toml_str(
            r#"
[tables.domestic.region_rates]
JEJU = [0, 0, 0, 480000, 540000, 630000, 0]

[tables.carriers.ups.per_kg]
Z2 = 9000
"#,
        )
        .unwrap();
        let defaults = RateTables::default();

        let regions = &config.tables.domestic.region_rates;
        assert_eq!(regions.len(), defaults.domestic.region_rates.len());
        assert_eq!(regions["JEJU"][3], 480_000.0);
        assert_eq!(regions["SEOUL"], defaults.domestic.region_rates["SEOUL"]);

        let ups = &config.tables.carriers.ups;
        assert_eq!(ups.per_kg["Z2"], 9_000.0);
        assert_eq!(ups.per_kg["US_WEST"], defaults.carriers.ups.per_kg["US_WEST"]);
        assert_eq!(config.tables.zones.labels, defaults.zones.labels);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lists_are_replaced_whole() {
        let config = QuoteConfig::from_toml_str(
            r#"
[[tables.international.volume_discounts]]
min_weight = 300.0
factor = 0.8
"#,
        )
        .unwrap();
        assert_eq!(config.tables.international.volume_discounts.len(), 1);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            QuoteConfig::load(Some(path)),
            Err(CliError::Read { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let file = write_config("[market\nfx_rate = ");
        assert!(matches!(
            QuoteConfig::from_file(file.path()),
            Err(CliError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_FX_RATE, "1380.5"),
            (ENV_FUEL_SURCHARGE_PCT, "not-a-number"),
            (ENV_DEFAULT_MARGIN_PCT, " 12 "),
        ]
        .into_iter()
        .collect();

        let mut config = QuoteConfig::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.market.fx_rate, 1_380.5);
        assert_eq!(config.market.fuel_surcharge_pct, 18.0);
        assert_eq!(config.market.margin_pct, 12.0);
    }

    #[test]
    fn test_validation_rejects_bad_market_defaults() {
        let mut config = QuoteConfig::default();
        config.market.fx_rate = 0.0;
        assert!(matches!(config.validate(), Err(CliError::Validation(_))));

        let mut config = QuoteConfig::default();
        config.market.margin_pct = 100.0;
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_validation_rejects_bad_tables() {
        let mut config = QuoteConfig::default();
        config.tables.domestic.tiers.clear();
        assert!(matches!(config.validate(), Err(CliError::Tables(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = QuoteConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[market]"));
        let parsed: QuoteConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
