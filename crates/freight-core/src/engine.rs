//! # Quote Engine
//!
//! Runs the fixed pricing pipeline over injected [`RateTables`].
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QuoteInput                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  1. pack_items ────────────► PackedItem[] + PackingCost                 │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  2. per item: weight, volumetric, m³ totals + classify_unit × qty       │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  3. domestic leg (actual kg, m³, region)                                │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  4. zone ──► international leg (billable kg = max(actual, volumetric))  │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  5. CostBreakdown ──► margin base by trade term ──► solve               │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  QuoteResult (+ warnings from every stage)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Engine::quote` is pure: no I/O, no clock, no randomness. The same input
//! always yields the same result, and an `Engine` can be shared across
//! threads without locking.

use tracing::debug;

use crate::domestic::DomesticRequest;
use crate::error::CoreResult;
use crate::geometry::{billable_weight, cubic_volume, volumetric_weight};
use crate::international;
use crate::margin;
use crate::packing::pack_items;
use crate::surcharge::{classify_unit, UnitMeasure};
use crate::tables::RateTables;
use crate::types::{CostBreakdown, QuoteInput, QuoteResult};
use crate::zone::Zone;

/// Shipment totals after packing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    actual_weight: f64,
    volumetric_weight: f64,
    volume: f64,
    units: u32,
    carrier_surcharge: f64,
}

/// The pricing engine. Owns read-only tables.
#[derive(Debug, Clone)]
pub struct Engine {
    tables: RateTables,
}

impl Default for Engine {
    /// Engine over the built-in tariff.
    fn default() -> Self {
        let mut tables = RateTables::default();
        tables.normalize();
        Engine { tables }
    }
}

impl Engine {
    /// Builds an engine after validating the tables.
    pub fn new(mut tables: RateTables) -> CoreResult<Self> {
        tables.validate()?;
        tables.normalize();
        Ok(Engine { tables })
    }

    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    /// Resolves the carrier zone for a destination.
    pub fn classify_zone(&self, country: &str, postal_code: &str) -> Zone {
        self.tables.zones.classify(country, postal_code)
    }

    /// Prices a shipment.
    ///
    /// Never fails. Input shape is the caller's responsibility
    /// (see [`validate_quote_input`](crate::validation::validate_quote_input));
    /// business problems come back as `warnings`.
    pub fn quote(&self, input: &QuoteInput) -> QuoteResult {
        let t = &self.tables;
        let mut warnings = Vec::new();

        // 1. Packing
        let (packed, packing) = pack_items(
            &input.items,
            input.packing_type,
            input.manual_packing_cost,
            &t.packing,
        );

        // 2. Aggregate and classify surcharges
        let mut totals = Totals::default();
        for (index, unit) in packed.iter().enumerate() {
            let qty = unit.quantity as f64;
            totals.actual_weight += unit.weight * qty;
            totals.volumetric_weight += volumetric_weight(unit.length, unit.width, unit.height) * qty;
            totals.volume += cubic_volume(unit.length, unit.width, unit.height) * qty;
            totals.units = totals.units.saturating_add(unit.quantity);

            let measure = UnitMeasure::new(unit.length, unit.width, unit.height, unit.weight);
            let surcharge = classify_unit(&measure, input.packing_type, &t.surcharges);
            totals.carrier_surcharge += surcharge.amount * qty;
            warnings.extend(surcharge.describe(index, unit.quantity));
        }
        let billable = billable_weight(totals.actual_weight, totals.volumetric_weight);
        debug!(
            actual = totals.actual_weight,
            volumetric = totals.volumetric_weight,
            billable,
            volume = totals.volume,
            units = totals.units,
            "Shipment aggregated"
        );

        // 3. Domestic leg
        let domestic = t.domestic.quote(&DomesticRequest {
            weight: totals.actual_weight,
            volume: totals.volume,
            region: &input.pickup_region,
            remote_pickup: input.remote_pickup,
            manual_rate: input.manual_domestic_cost,
            unit_count: totals.units,
        });
        debug!(tier = %domestic.tier_label, base = domestic.base, "Domestic leg priced");
        warnings.extend(domestic.warnings.iter().cloned());

        // 4. International leg
        let zone = self.classify_zone(&input.destination_country, &input.destination_postal);
        let profile = t.carriers.profile(input.carrier);
        let intl = international::quote(
            billable,
            &zone,
            input.fuel_surcharge_pct,
            profile,
            &t.international,
        );
        if intl.used_fallback {
            warnings.push(format!(
                "No {} rate published for {}; fallback rate applied",
                input.carrier, zone.label
            ));
        }

        // 5. Cost breakdown and margin
        let mut breakdown = CostBreakdown {
            domestic_base: domestic.base,
            domestic_surcharge: domestic.surcharge,
            packing_material: packing.material,
            packing_labor: packing.labor,
            packing_fumigation: packing.fumigation,
            handling_fees: packing.handling,
            carrier_base: intl.base,
            carrier_fuel: intl.fuel_surcharge,
            carrier_war_risk: intl.war_risk,
            carrier_surcharge: totals.carrier_surcharge,
            destination_duty: if input.trade_term.includes_duty() {
                input.duty_estimate
            } else {
                0.0
            },
            total_cost: 0.0,
        };
        breakdown.total_cost = breakdown.sum();

        let margin_base = if input.trade_term.bills_international() {
            breakdown.total_cost
        } else {
            warnings.push(format!(
                "{}: international freight ({:.0}) is shown for reference only and may be billed separately",
                input.trade_term,
                breakdown.international_subtotal()
            ));
            breakdown.origin_subtotal() + breakdown.destination_duty
        };

        let solution = margin::solve(margin_base, input.margin_pct, input.fx_rate, &t.margin);
        debug!(
            cost = margin_base,
            margin = solution.margin_pct,
            quote = %solution.total_quote,
            "Margin solved"
        );

        if input.margin_pct < t.margin.low_margin_pct {
            warnings.push(format!(
                "Low margin: {}% is below the {}% guideline",
                input.margin_pct, t.margin.low_margin_pct
            ));
        }
        if totals.volumetric_weight > totals.actual_weight * t.volumetric_warning_ratio {
            warnings.push(format!(
                "Volumetric weight {:.1}kg exceeds actual weight {:.1}kg by more than {:.0}%; consider repacking",
                totals.volumetric_weight,
                totals.actual_weight,
                (t.volumetric_warning_ratio - 1.0) * 100.0
            ));
        }

        QuoteResult {
            total_quote: solution.total_quote,
            total_quote_usd: solution.total_quote_usd,
            total_cost: margin_base,
            profit: solution.profit,
            profit_margin: input.margin_pct,
            actual_weight: totals.actual_weight,
            volumetric_weight: totals.volumetric_weight,
            billable_weight: billable,
            carrier: input.carrier,
            zone_key: zone.key,
            applied_zone: intl.zone_label,
            transit_time: intl.transit_time,
            truck_tier: domestic.tier_label,
            warnings,
            breakdown,
        }
    }
}
