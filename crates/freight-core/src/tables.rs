//! # Rate Tables
//!
//! All tariff data the engine reads, in one injectable value.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RateTables                                                             │
//! │  ├── zones          ZoneTable          country / postal → zone         │
//! │  ├── carriers       CarrierTable       per-kg rates per carrier        │
//! │  ├── international  InternationalRates volume discounts, war risk      │
//! │  ├── surcharges     SurchargeRules     oversize thresholds and rates   │
//! │  ├── packing        PackingRates       growth, material, labor         │
//! │  ├── domestic       DomesticTable      truck tiers, regional rates     │
//! │  └── margin         MarginPolicy       clamp, rounding, low-margin     │
//! │                                                                         │
//! │  Default::default() is the built-in tariff. A config file overrides    │
//! │  any section it names (every struct is #[serde(default)]).            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tables are read-only once an [`Engine`](crate::engine::Engine) owns them.
//! Live values (FX, fuel surcharge) are NOT here; they travel in each request.

use serde::{Deserialize, Serialize};

use crate::carrier::CarrierTable;
use crate::domestic::DomesticTable;
use crate::error::{CoreError, CoreResult};
use crate::international::InternationalRates;
use crate::margin::MarginPolicy;
use crate::packing::PackingRates;
use crate::surcharge::SurchargeRules;
use crate::zone::ZoneTable;

/// Complete tariff configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTables {
    pub zones: ZoneTable,
    pub carriers: CarrierTable,
    pub international: InternationalRates,
    pub surcharges: SurchargeRules,
    pub packing: PackingRates,
    pub domestic: DomesticTable,
    pub margin: MarginPolicy,
    /// Warn when volumetric weight exceeds actual weight by this ratio.
    pub volumetric_warning_ratio: f64,
}

impl Default for RateTables {
    fn default() -> Self {
        RateTables {
            zones: ZoneTable::default(),
            carriers: CarrierTable::default(),
            international: InternationalRates::default(),
            surcharges: SurchargeRules::default(),
            packing: PackingRates::default(),
            domestic: DomesticTable::default(),
            margin: MarginPolicy::default(),
            volumetric_warning_ratio: 1.2,
        }
    }
}

fn check_rate(table: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::InvalidRate {
            table: table.to_string(),
            value,
        })
    }
}

impl RateTables {
    /// Checks that the tables can price any well-formed request.
    ///
    /// ## Checks
    /// - at least one truck tier, ascending by weight and volume
    /// - every region row has exactly one rate per tier
    /// - freight tier index is inside the tier list
    /// - all rates are finite and non-negative
    /// - discount factors in (0, 1]
    /// - postal ranges not inverted, every zone labelled
    /// - max margin in [0, 100), rounding increment at least 1
    pub fn validate(&self) -> CoreResult<()> {
        let tiers = &self.domestic.tiers;
        if tiers.is_empty() {
            return Err(CoreError::NoTruckTiers);
        }
        for (index, pair) in tiers.windows(2).enumerate() {
            if pair[1].max_weight < pair[0].max_weight || pair[1].max_volume < pair[0].max_volume {
                return Err(CoreError::TiersNotAscending {
                    index: index + 1,
                    label: pair[1].label.clone(),
                });
            }
        }
        if self.domestic.freight_tier_index >= tiers.len() {
            return Err(CoreError::FreightTierOutOfRange {
                index: self.domestic.freight_tier_index,
                len: tiers.len(),
            });
        }
        for (region, row) in &self.domestic.region_rates {
            if row.len() != tiers.len() {
                return Err(CoreError::RegionRateCount {
                    region: region.clone(),
                    expected: tiers.len(),
                    found: row.len(),
                });
            }
            for rate in row {
                check_rate(&format!("domestic.{}", region), *rate)?;
            }
        }
        for rate in [
            self.domestic.remote_freight_rate,
            self.domestic.remote_per_unit,
            self.domestic.remote_minimum,
        ] {
            check_rate("domestic", rate)?;
        }

        for (carrier, profile) in self.carriers.profiles() {
            let table = format!("carriers.{}", carrier);
            check_rate(&table, profile.fallback_per_kg)?;
            for rate in profile.per_kg.values() {
                check_rate(&table, *rate)?;
            }
        }

        for d in &self.international.volume_discounts {
            if !(d.factor > 0.0 && d.factor <= 1.0) {
                return Err(CoreError::InvalidDiscount {
                    min_weight: d.min_weight,
                    factor: d.factor,
                });
            }
        }
        check_rate("international", self.international.war_risk_rate)?;

        for rate in self.surcharges.rates() {
            check_rate("surcharges", rate)?;
        }
        for rate in self.packing.rates() {
            check_rate("packing", rate)?;
        }

        let max_margin = self.margin.max_margin_pct;
        if !(0.0..100.0).contains(&max_margin) {
            return Err(CoreError::InvalidRate {
                table: "margin.max_margin_pct".to_string(),
                value: max_margin,
            });
        }
        if self.margin.rounding_increment < 1 {
            return Err(CoreError::InvalidRate {
                table: "margin.rounding_increment".to_string(),
                value: self.margin.rounding_increment as f64,
            });
        }

        self.zones.validate()
    }

    /// Puts order-sensitive lists into scan order.
    pub(crate) fn normalize(&mut self) {
        self.international.sort_discounts();
    }
}
