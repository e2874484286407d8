//! # International Leg Calculator
//!
//! Carrier cost on billable weight:
//!
//! ```text
//! base       = billable kg × zone rate × volume discount
//! fuel       = base × fuel %            (if the carrier bills fuel)
//! war risk   = base × war_risk_rate     (if the carrier bills war risk)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::carrier::CarrierProfile;
use crate::zone::Zone;

/// Discount applied when billable weight is above `min_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeDiscount {
    pub min_weight: f64,
    /// Multiplier on base, e.g. 0.85 for 15% off.
    pub factor: f64,
}

/// Carrier-independent surcharge settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternationalRates {
    /// Largest break first. The first break the weight exceeds wins.
    pub volume_discounts: Vec<VolumeDiscount>,
    pub war_risk_rate: f64,
}

impl Default for InternationalRates {
    fn default() -> Self {
        InternationalRates {
            volume_discounts: vec![
                VolumeDiscount {
                    min_weight: 100.0,
                    factor: 0.85,
                },
                VolumeDiscount {
                    min_weight: 45.0,
                    factor: 0.90,
                },
            ],
            war_risk_rate: 0.05,
        }
    }
}

impl InternationalRates {
    /// Discount multiplier for a billable weight. 1.0 when no break applies.
    pub fn discount_factor(&self, billable_weight: f64) -> f64 {
        self.volume_discounts
            .iter()
            .find(|d| billable_weight > d.min_weight)
            .map_or(1.0, |d| d.factor)
    }

    pub(crate) fn sort_discounts(&mut self) {
        self.volume_discounts
            .sort_by(|a, b| b.min_weight.total_cmp(&a.min_weight));
    }
}

/// Priced international leg.
#[derive(Debug, Clone, PartialEq)]
pub struct InternationalQuote {
    pub base: f64,
    pub fuel_surcharge: f64,
    pub war_risk: f64,
    pub zone_label: String,
    pub transit_time: String,
    /// The zone had no rate on the carrier's card.
    pub used_fallback: bool,
}

/// Prices the international leg for one carrier.
pub fn quote(
    billable_weight: f64,
    zone: &Zone,
    fuel_surcharge_pct: f64,
    profile: &CarrierProfile,
    rates: &InternationalRates,
) -> InternationalQuote {
    let (per_kg, on_card) = profile.rate_for(&zone.key);
    if !on_card {
        debug!(zone = %zone.key, per_kg, "Zone not on rate card, using fallback rate");
    }

    let base = billable_weight * per_kg * rates.discount_factor(billable_weight);
    let fuel_surcharge = if profile.fuel_surcharge {
        base * (fuel_surcharge_pct / 100.0)
    } else {
        0.0
    };
    let war_risk = if profile.war_risk {
        base * rates.war_risk_rate
    } else {
        0.0
    };

    InternationalQuote {
        base,
        fuel_surcharge,
        war_risk,
        zone_label: zone.label.clone(),
        transit_time: profile.transit_time.clone(),
        used_fallback: !on_card,
    }
}
