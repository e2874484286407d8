//! # Zone Classifier
//!
//! Maps a destination (country, postal code) to a carrier pricing zone.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  postal code ──► strip non-digits                                      │
//! │                                                                         │
//! │  country == hub (CN)?                                                   │
//! │    leading 6 digits inside a southern range ──► CN_SOUTH               │
//! │    anything else (incl. empty)              ──► CN_NORTH               │
//! │                                                                         │
//! │  country == long-haul (US)?                                             │
//! │    first digit band, first match wins       ──► US_WEST / US_CENTRAL   │
//! │    no band matched (0-3, empty, garbage)    ──► US_EAST                │
//! │                                                                         │
//! │  otherwise                                                              │
//! │    per-country default                      ──► Z2 .. Z6               │
//! │    unlisted country                         ──► catch-all              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Classification never fails. Every input resolves to some zone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// A resolved pricing zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Machine key used for rate lookup.
    pub key: String,
    /// Human-readable label for display.
    pub label: String,
}

/// Inclusive range of 6-digit postal codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalRange {
    pub start: u32,
    pub end: u32,
}

impl PostalRange {
    pub const fn new(start: u32, end: u32) -> Self {
        PostalRange { start, end }
    }

    #[inline]
    pub fn contains(&self, code: u32) -> bool {
        (self.start..=self.end).contains(&code)
    }
}

/// Leading-digit band for the long-haul country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitBand {
    pub first: u8,
    pub last: u8,
    pub zone: String,
}

impl DigitBand {
    fn new(first: u8, last: u8, zone: &str) -> Self {
        DigitBand {
            first,
            last,
            zone: zone.to_string(),
        }
    }
}

/// Geography tables for zone classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneTable {
    /// Primary outbound hub country, split north/south by postal code.
    pub hub_country: String,
    pub hub_south_zone: String,
    pub hub_north_zone: String,
    pub hub_south_ranges: Vec<PostalRange>,

    /// Primary long-haul country, split by leading postal digit.
    pub long_haul_country: String,
    /// Scanned in order; first band containing the digit wins.
    pub long_haul_bands: Vec<DigitBand>,
    pub long_haul_default_zone: String,

    /// Default zone per country code.
    pub country_zones: BTreeMap<String, String>,
    /// Zone for countries not listed anywhere.
    pub catch_all_zone: String,

    /// Display label per zone key.
    pub labels: BTreeMap<String, String>,
}

impl Default for ZoneTable {
    fn default() -> Self {
        let country_zones = [
            ("HK", "CN_SOUTH"),
            ("MO", "CN_SOUTH"),
            ("JP", "Z2"),
            ("TW", "Z2"),
            ("SG", "Z3"),
            ("VN", "Z3"),
            ("TH", "Z3"),
            ("MY", "Z3"),
            ("PH", "Z3"),
            ("ID", "Z3"),
            ("AU", "Z4"),
            ("NZ", "Z4"),
            ("IN", "Z4"),
            ("CA", "Z5"),
            ("MX", "Z5"),
            ("DE", "Z6"),
            ("FR", "Z6"),
            ("GB", "Z6"),
            ("IT", "Z6"),
            ("ES", "Z6"),
            ("NL", "Z6"),
        ];
        let labels = [
            ("CN_SOUTH", "China - South"),
            ("CN_NORTH", "China - North/Other"),
            ("US_WEST", "USA - West"),
            ("US_CENTRAL", "USA - Central"),
            ("US_EAST", "USA - East"),
            ("Z2", "Zone 2 (Japan/Taiwan)"),
            ("Z3", "Zone 3 (Southeast Asia)"),
            ("Z4", "Zone 4 (Oceania/India)"),
            ("Z5", "Zone 5 (Canada/Mexico)"),
            ("Z6", "Zone 6 (Europe)"),
            ("Z7", "Zone 7 (Rest of World)"),
        ];

        ZoneTable {
            hub_country: "CN".to_string(),
            hub_south_zone: "CN_SOUTH".to_string(),
            hub_north_zone: "CN_NORTH".to_string(),
            hub_south_ranges: vec![
                // Fujian
                PostalRange::new(350_000, 369_999),
                // Guangdong
                PostalRange::new(510_000, 529_999),
                // Guangxi
                PostalRange::new(530_000, 549_999),
                // Hainan
                PostalRange::new(570_000, 579_999),
            ],
            long_haul_country: "US".to_string(),
            long_haul_bands: vec![
                DigitBand::new(8, 9, "US_WEST"),
                DigitBand::new(4, 7, "US_CENTRAL"),
            ],
            long_haul_default_zone: "US_EAST".to_string(),
            country_zones: country_zones
                .iter()
                .map(|(c, z)| (c.to_string(), z.to_string()))
                .collect(),
            catch_all_zone: "Z7".to_string(),
            labels: labels
                .iter()
                .map(|(k, l)| (k.to_string(), l.to_string()))
                .collect(),
        }
    }
}

impl ZoneTable {
    /// Resolves the zone for a destination. Never fails.
    pub fn classify(&self, country: &str, postal_code: &str) -> Zone {
        let country = country.trim().to_ascii_uppercase();
        let digits: String = postal_code.chars().filter(|c| c.is_ascii_digit()).collect();

        let key = if country == self.hub_country {
            self.classify_hub(&digits)
        } else if country == self.long_haul_country {
            self.classify_long_haul(&digits)
        } else {
            self.country_zones
                .get(&country)
                .unwrap_or(&self.catch_all_zone)
                .as_str()
        };

        debug!(%country, postal = %digits, zone = key, "Zone resolved");
        self.zone(key)
    }

    /// Builds a [`Zone`] from a key, falling back to the key as its label.
    pub fn zone(&self, key: &str) -> Zone {
        Zone {
            key: key.to_string(),
            label: self
                .labels
                .get(key)
                .cloned()
                .unwrap_or_else(|| key.to_string()),
        }
    }

    fn classify_hub(&self, digits: &str) -> &str {
        let leading: String = digits.chars().take(6).collect();
        match leading.parse::<u32>() {
            Ok(code) if self.hub_south_ranges.iter().any(|r| r.contains(code)) => {
                self.hub_south_zone.as_str()
            }
            _ => self.hub_north_zone.as_str(),
        }
    }

    fn classify_long_haul(&self, digits: &str) -> &str {
        digits
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .and_then(|d| {
                self.long_haul_bands
                    .iter()
                    .find(|band| (band.first as u32..=band.last as u32).contains(&d))
            })
            .map(|band| band.zone.as_str())
            .unwrap_or(self.long_haul_default_zone.as_str())
    }

    /// Every zone key the classifier can return.
    pub fn zone_keys(&self) -> Vec<&str> {
        let mut keys = vec![
            self.hub_south_zone.as_str(),
            self.hub_north_zone.as_str(),
            self.long_haul_default_zone.as_str(),
            self.catch_all_zone.as_str(),
        ];
        keys.extend(self.long_haul_bands.iter().map(|b| b.zone.as_str()));
        keys.extend(self.country_zones.values().map(String::as_str));
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    pub(crate) fn validate(&self) -> CoreResult<()> {
        if let Some(r) = self.hub_south_ranges.iter().find(|r| r.start > r.end) {
            return Err(CoreError::InvertedPostalRange {
                start: r.start,
                end: r.end,
            });
        }
        if let Some(key) = self.zone_keys().into_iter().find(|k| !self.labels.contains_key(*k)) {
            return Err(CoreError::UnlabeledZone(key.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ZoneTable {
        ZoneTable::default()
    }

    #[test]
    fn test_china_south_and_north() {
        let t = table();
        assert_eq!(t.classify("CN", "520000").key, "CN_SOUTH");
        assert_eq!(t.classify("CN", "520000").label, "China - South");
        assert_eq!(t.classify("CN", "110000").key, "CN_NORTH");
        assert_eq!(t.classify("cn", "518-000").key, "CN_SOUTH");
    }

    #[test]
    fn test_china_empty_postal_is_north() {
        assert_eq!(table().classify("CN", "").key, "CN_NORTH");
        assert_eq!(table().classify("CN", "n/a").key, "CN_NORTH");
    }

    #[test]
    fn test_china_uses_leading_six_digits() {
        // 51800012 → 518000
        assert_eq!(table().classify("CN", "51800012").key, "CN_SOUTH");
    }

    #[test]
    fn test_us_bands() {
        let t = table();
        assert_eq!(t.classify("US", "90210").key, "US_WEST");
        assert_eq!(t.classify("US", "80202").key, "US_WEST");
        assert_eq!(t.classify("US", "60601").key, "US_CENTRAL");
        assert_eq!(t.classify("US", "40202").key, "US_CENTRAL");
        // Leading digit 3 falls in the 0-3 east band, Atlanta included.
        assert_eq!(t.classify("US", "30301").key, "US_EAST");
        assert_eq!(t.classify("US", "10001").key, "US_EAST");
    }

    #[test]
    fn test_us_empty_or_garbage_is_east() {
        assert_eq!(table().classify("US", "").key, "US_EAST");
        assert_eq!(table().classify("US", "ABC").key, "US_EAST");
        assert_eq!(table().classify("US", "").label, "USA - East");
    }

    #[test]
    fn test_country_defaults_and_catch_all() {
        let t = table();
        assert_eq!(t.classify("JP", "100-0001").key, "Z2");
        assert_eq!(t.classify("de", "").key, "Z6");
        assert_eq!(t.classify("BR", "01000").key, "Z7");
        assert_eq!(t.classify("", "").key, "Z7");
    }

    #[test]
    fn test_default_table_is_valid() {
        assert!(table().validate().is_ok());
    }

    #[test]
    fn test_unlabeled_zone_rejected() {
        let mut t = table();
        t.country_zones.insert("BR".to_string(), "Z9".to_string());
        assert!(matches!(t.validate(), Err(CoreError::UnlabeledZone(z)) if z == "Z9"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut t = table();
        t.hub_south_ranges.push(PostalRange::new(600_000, 500_000));
        assert!(matches!(t.validate(), Err(CoreError::InvertedPostalRange { .. })));
    }
}
