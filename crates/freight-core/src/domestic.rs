//! # Domestic Leg Calculator
//!
//! Prices the pickup from the shipper to the export terminal.
//!
//! ## Tier Selection and Fallbacks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tiers (ascending)   Damas ─ Labo ─ 1T ─ 2.5T ─ 3.5T ─ 5T ─ 11T         │
//! │                                                                         │
//! │  1. first tier with weight AND volume headroom                         │
//! │       none fits ──► largest tier + "exceeds capacity" warning          │
//! │                                                                         │
//! │  2. rate = region_rates[region][tier]                                  │
//! │       manual override > 0 ──► use it, label "(Manual Rate)"            │
//! │       rate == 0 (unpublished) ──► next larger tier with a rate,        │
//! │                                   label "(Auto-Upgrade)" + warning     │
//! │       nothing larger either ──► base 0 + "no valid rate" warning       │
//! │                                                                         │
//! │  3. remote island pickup                                               │
//! │       tier ≥ freight tier (1T)  ──► +100% of base                      │
//! │       parcel tiers              ──► flat per unit (with a minimum)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One vehicle band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckTier {
    pub label: String,
    /// kg
    pub max_weight: f64,
    /// m³
    pub max_volume: f64,
}

impl TruckTier {
    fn new(label: &str, max_weight: f64, max_volume: f64) -> Self {
        TruckTier {
            label: label.to_string(),
            max_weight,
            max_volume,
        }
    }

    fn fits(&self, weight: f64, volume: f64) -> bool {
        weight <= self.max_weight && volume <= self.max_volume
    }
}

/// Vehicle bands and regional pickup rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomesticTable {
    /// Ordered smallest to largest.
    pub tiers: Vec<TruckTier>,
    /// One rate per tier. Zero means not published for that region.
    pub region_rates: BTreeMap<String, Vec<f64>>,
    /// First tier index priced as freight (1-ton truck) for remote pickups.
    pub freight_tier_index: usize,
    /// Fraction of base added for remote freight pickups. 1.0 = 100%.
    pub remote_freight_rate: f64,
    pub remote_per_unit: f64,
    pub remote_minimum: f64,
}

impl Default for DomesticTable {
    fn default() -> Self {
        let rates: [(&str, [f64; 7]); 8] = [
            ("SEOUL", [45_000.0, 55_000.0, 80_000.0, 130_000.0, 160_000.0, 200_000.0, 320_000.0]),
            ("INCHEON", [50_000.0, 60_000.0, 85_000.0, 140_000.0, 170_000.0, 215_000.0, 340_000.0]),
            ("GYEONGGI", [55_000.0, 65_000.0, 95_000.0, 150_000.0, 180_000.0, 230_000.0, 360_000.0]),
            ("CHUNGCHEONG", [90_000.0, 105_000.0, 150_000.0, 230_000.0, 270_000.0, 330_000.0, 480_000.0]),
            ("GANGWON", [0.0, 0.0, 170_000.0, 260_000.0, 300_000.0, 360_000.0, 520_000.0]),
            ("GYEONGSANG", [120_000.0, 140_000.0, 200_000.0, 300_000.0, 350_000.0, 420_000.0, 600_000.0]),
            ("JEOLLA", [0.0, 130_000.0, 190_000.0, 290_000.0, 340_000.0, 410_000.0, 590_000.0]),
            ("JEJU", [0.0, 0.0, 0.0, 450_000.0, 520_000.0, 610_000.0, 0.0]),
        ];

        DomesticTable {
            tiers: vec![
                TruckTier::new("Damas", 300.0, 1.5),
                TruckTier::new("Labo", 500.0, 2.5),
                TruckTier::new("1 Ton Truck", 1_000.0, 5.0),
                TruckTier::new("2.5 Ton Truck", 2_500.0, 10.0),
                TruckTier::new("3.5 Ton Truck", 3_500.0, 14.0),
                TruckTier::new("5 Ton Truck", 5_000.0, 20.0),
                TruckTier::new("11 Ton Truck", 11_000.0, 40.0),
            ],
            region_rates: rates
                .iter()
                .map(|(region, row)| (region.to_string(), row.to_vec()))
                .collect(),
            freight_tier_index: 2,
            remote_freight_rate: 1.0,
            remote_per_unit: 10_000.0,
            remote_minimum: 30_000.0,
        }
    }
}

/// Inputs to the domestic leg.
#[derive(Debug, Clone, Copy)]
pub struct DomesticRequest<'a> {
    /// Total shipped weight (kg), after packing.
    pub weight: f64,
    /// Total cubic volume (m³), after packing.
    pub volume: f64,
    pub region: &'a str,
    pub remote_pickup: bool,
    pub manual_rate: Option<f64>,
    pub unit_count: u32,
}

/// Priced domestic leg.
#[derive(Debug, Clone, PartialEq)]
pub struct DomesticQuote {
    pub base: f64,
    pub surcharge: f64,
    /// Tier actually priced (after any auto-upgrade).
    pub tier_index: usize,
    pub tier_label: String,
    pub warnings: Vec<String>,
}

impl DomesticTable {
    /// Index of the first tier that carries the load, or None if none does.
    pub fn select_tier(&self, weight: f64, volume: f64) -> Option<usize> {
        self.tiers.iter().position(|t| t.fits(weight, volume))
    }

    fn rate(&self, region: &str, tier: usize) -> f64 {
        self.region_rates
            .get(region)
            .and_then(|row| row.get(tier))
            .copied()
            .unwrap_or(0.0)
    }

    /// Prices the domestic leg. Assumes a non-empty tier list.
    pub fn quote(&self, req: &DomesticRequest<'_>) -> DomesticQuote {
        let region = req.region.trim().to_ascii_uppercase();
        let mut warnings = Vec::new();
        let last = self.tiers.len().saturating_sub(1);

        let mut tier_index = match self.select_tier(req.weight, req.volume) {
            Some(i) => i,
            None => {
                warnings.push(format!(
                    "Shipment ({:.1}kg / {:.2}m³) exceeds domestic vehicle capacity; quoted at max tier ({})",
                    req.weight, req.volume, self.tiers[last].label
                ));
                last
            }
        };
        let mut tier_label = self.tiers[tier_index].label.clone();
        let mut base = self.rate(&region, tier_index);

        if let Some(manual) = req.manual_rate.filter(|r| *r > 0.0) {
            base = manual;
            tier_label = format!("{} (Manual Rate)", tier_label);
        } else if base == 0.0 {
            let upgrade = (tier_index + 1..self.tiers.len())
                .find(|&i| self.rate(&region, i) > 0.0);
            match upgrade {
                Some(i) => {
                    debug!(%region, from = tier_index, to = i, "Domestic tier auto-upgraded");
                    warnings.push(format!(
                        "Standard rate unavailable for {} ({}); auto-upgraded to {}. Negotiate with the carrier and enter a manual rate.",
                        region, tier_label, self.tiers[i].label
                    ));
                    tier_index = i;
                    base = self.rate(&region, i);
                    tier_label = format!("{} (Auto-Upgrade)", self.tiers[i].label);
                }
                None => {
                    debug!(%region, tier = tier_index, "No published domestic rate");
                    warnings.push(format!(
                        "No valid domestic rate for {} at {} or larger; enter a manual rate.",
                        region, tier_label
                    ));
                }
            }
        }

        let mut surcharge = 0.0;
        if req.remote_pickup {
            if tier_index >= self.freight_tier_index {
                surcharge = base * self.remote_freight_rate;
                warnings.push(format!(
                    "Remote island pickup: {:.0}% surcharge applied to {}",
                    self.remote_freight_rate * 100.0,
                    tier_label
                ));
            } else {
                surcharge = self.remote_per_unit * req.unit_count as f64;
                if surcharge <= 0.0 {
                    surcharge = self.remote_minimum;
                }
                warnings.push(format!(
                    "Remote island pickup: parcel surcharge {:.0} applied ({} units)",
                    surcharge, req.unit_count
                ));
            }
        }

        DomesticQuote {
            base,
            surcharge,
            tier_index,
            tier_label,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(weight: f64, volume: f64, region: &str) -> DomesticRequest<'_> {
        DomesticRequest {
            weight,
            volume,
            region,
            remote_pickup: false,
            manual_rate: None,
            unit_count: 1,
        }
    }

    #[test]
    fn test_tier_needs_weight_and_volume_headroom() {
        let t = DomesticTable::default();
        assert_eq!(t.select_tier(100.0, 1.0), Some(0));
        // light but bulky
        assert_eq!(t.select_tier(100.0, 2.0), Some(1));
        // small but heavy
        assert_eq!(t.select_tier(900.0, 0.5), Some(2));
        assert_eq!(t.select_tier(20_000.0, 1.0), None);
    }

    #[test]
    fn test_standard_rate() {
        let q = DomesticTable::default().quote(&request(100.0, 1.0, "seoul"));
        assert_eq!(q.base, 45_000.0);
        assert_eq!(q.surcharge, 0.0);
        assert_eq!(q.tier_label, "Damas");
        assert!(q.warnings.is_empty());
    }

    #[test]
    fn test_over_capacity_clamps_to_largest() {
        let q = DomesticTable::default().quote(&request(12_000.0, 30.0, "SEOUL"));
        assert_eq!(q.tier_index, 6);
        assert_eq!(q.base, 320_000.0);
        assert_eq!(q.warnings.len(), 1);
        assert!(q.warnings[0].contains("exceeds domestic vehicle capacity"));
    }

    #[test]
    fn test_manual_rate_replaces_table() {
        let mut req = request(100.0, 1.0, "SEOUL");
        req.manual_rate = Some(70_000.0);
        let q = DomesticTable::default().quote(&req);
        assert_eq!(q.base, 70_000.0);
        assert_eq!(q.tier_label, "Damas (Manual Rate)");
    }

    #[test]
    fn test_zero_manual_rate_is_ignored() {
        let mut req = request(100.0, 1.0, "SEOUL");
        req.manual_rate = Some(0.0);
        let q = DomesticTable::default().quote(&req);
        assert_eq!(q.base, 45_000.0);
    }

    #[test]
    fn test_unpublished_rate_auto_upgrades() {
        let q = DomesticTable::default().quote(&request(100.0, 1.0, "GANGWON"));
        assert_eq!(q.tier_index, 2);
        assert_eq!(q.base, 170_000.0);
        assert_eq!(q.tier_label, "1 Ton Truck (Auto-Upgrade)");
        let unavailable: Vec<_> = q
            .warnings
            .iter()
            .filter(|w| w.contains("Standard rate unavailable"))
            .collect();
        assert_eq!(unavailable.len(), 1);
        assert!(unavailable[0].contains("GANGWON"));
    }

    #[test]
    fn test_no_larger_rate_leaves_zero() {
        // JEJU has no 11 ton rate and nothing above it.
        let q = DomesticTable::default().quote(&request(9_000.0, 30.0, "JEJU"));
        assert_eq!(q.base, 0.0);
        assert!(q.warnings[0].contains("No valid domestic rate for JEJU"));
    }

    #[test]
    fn test_unknown_region_has_no_rate() {
        let q = DomesticTable::default().quote(&request(100.0, 1.0, "ATLANTIS"));
        assert_eq!(q.base, 0.0);
        assert!(q.warnings[0].contains("ATLANTIS"));
    }

    #[test]
    fn test_remote_freight_doubles_base() {
        let mut req = request(900.0, 3.0, "SEOUL");
        req.remote_pickup = true;
        let q = DomesticTable::default().quote(&req);
        assert_eq!(q.base, 80_000.0);
        assert_eq!(q.surcharge, 80_000.0);
        assert!(q.warnings[0].contains("100% surcharge"));
    }

    #[test]
    fn test_remote_freight_uses_upgraded_tier() {
        let mut req = request(100.0, 1.0, "GANGWON");
        req.remote_pickup = true;
        let q = DomesticTable::default().quote(&req);
        assert_eq!(q.surcharge, q.base);
    }

    #[test]
    fn test_remote_parcel_per_unit_and_minimum() {
        let mut req = request(100.0, 1.0, "SEOUL");
        req.remote_pickup = true;
        req.unit_count = 4;
        let q = DomesticTable::default().quote(&req);
        assert_eq!(q.surcharge, 40_000.0);

        req.unit_count = 0;
        let q = DomesticTable::default().quote(&req);
        assert_eq!(q.surcharge, 30_000.0);
    }
}
