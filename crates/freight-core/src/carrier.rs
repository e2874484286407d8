//! # Carrier Profiles
//!
//! Rate card and surcharge applicability for each [`Carrier`].
//!
//! The carrier set is closed: the engine matches on [`Carrier`] once, here,
//! and everything downstream works with a `&CarrierProfile`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Carrier;

/// One carrier's international rate card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierProfile {
    /// Per-kg rate by zone key.
    pub per_kg: BTreeMap<String, f64>,
    /// Per-kg rate for zones missing from `per_kg`.
    pub fallback_per_kg: f64,
    /// Whether the market fuel surcharge is billed on top.
    pub fuel_surcharge: bool,
    /// Whether the war-risk surcharge is billed on top.
    pub war_risk: bool,
    pub transit_time: String,
}

impl CarrierProfile {
    fn from_rates(
        rates: &[(&str, f64)],
        fallback_per_kg: f64,
        fuel_surcharge: bool,
        war_risk: bool,
        transit_time: &str,
    ) -> Self {
        CarrierProfile {
            per_kg: rates.iter().map(|(z, r)| (z.to_string(), *r)).collect(),
            fallback_per_kg,
            fuel_surcharge,
            war_risk,
            transit_time: transit_time.to_string(),
        }
    }

    /// Per-kg rate for a zone, and whether the zone was on the card.
    pub fn rate_for(&self, zone_key: &str) -> (f64, bool) {
        match self.per_kg.get(zone_key) {
            Some(rate) => (*rate, true),
            None => (self.fallback_per_kg, false),
        }
    }
}

/// Profiles for every [`Carrier`] variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarrierTable {
    pub ups: CarrierProfile,
    pub dhl: CarrierProfile,
    pub emax: CarrierProfile,
}

impl CarrierTable {
    pub fn profile(&self, carrier: Carrier) -> &CarrierProfile {
        match carrier {
            Carrier::Ups => &self.ups,
            Carrier::Dhl => &self.dhl,
            Carrier::Emax => &self.emax,
        }
    }

    pub(crate) fn profiles(&self) -> [(Carrier, &CarrierProfile); 3] {
        [
            (Carrier::Ups, &self.ups),
            (Carrier::Dhl, &self.dhl),
            (Carrier::Emax, &self.emax),
        ]
    }
}

impl Default for CarrierTable {
    fn default() -> Self {
        CarrierTable {
            ups: CarrierProfile::from_rates(
                &[
                    ("CN_SOUTH", 5_200.0),
                    ("CN_NORTH", 5_800.0),
                    ("Z2", 6_200.0),
                    ("Z3", 7_000.0),
                    ("Z4", 9_800.0),
                    ("Z5", 12_800.0),
                    ("Z6", 12_000.0),
                    ("US_WEST", 11_500.0),
                    ("US_CENTRAL", 12_500.0),
                    ("US_EAST", 13_200.0),
                    ("Z7", 16_000.0),
                ],
                16_000.0,
                true,
                true,
                "3-5 Business Days",
            ),
            dhl: CarrierProfile::from_rates(
                &[
                    ("CN_SOUTH", 5_500.0),
                    ("CN_NORTH", 6_100.0),
                    ("Z2", 6_500.0),
                    ("Z3", 7_300.0),
                    ("Z4", 10_200.0),
                    ("Z5", 13_400.0),
                    ("Z6", 12_300.0),
                    ("US_WEST", 12_000.0),
                    ("US_CENTRAL", 13_000.0),
                    ("US_EAST", 13_600.0),
                    ("Z7", 16_800.0),
                ],
                16_800.0,
                true,
                true,
                "2-4 Business Days",
            ),
            emax: CarrierProfile::from_rates(
                &[
                    ("CN_SOUTH", 4_300.0),
                    ("CN_NORTH", 4_800.0),
                    ("Z2", 5_100.0),
                    ("Z3", 6_000.0),
                    ("US_WEST", 9_800.0),
                    ("US_CENTRAL", 10_600.0),
                    ("US_EAST", 11_200.0),
                ],
                14_500.0,
                false,
                false,
                "5-8 Business Days",
            ),
        }
    }
}
