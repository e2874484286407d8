//! # Packing Cost Calculator
//!
//! Grows each box for export packing and prices material, labor,
//! fumigation and handling.
//!
//! ## Flow
//! ```text
//! CargoItem (l, w, h, kg)
//!      │
//!      ▼
//! pack() ── packed? ──► (l+10, w+10, h+15, kg×1.1+10)   ← pallet base, dunnage
//!      │
//!      ├──► PackedItem ──► surcharge classifier, weight/volume totals
//!      │
//!      ▼
//! PackingCost
//!   material    += surface m² × rate × qty
//!   labor       += rate × qty, then ×1.5 on the running total for VACUUM
//!   fumigation  once per quote if anything was packed
//!   handling    always
//! ```
//!
//! A manual override replaces the whole lot: material becomes the override,
//! everything else is zero.

use serde::{Deserialize, Serialize};

use crate::types::{CargoItem, PackingType};

const CM2_PER_M2: f64 = 10_000.0;

/// Growth factors and rates for export packing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingRates {
    pub length_growth: f64,
    pub width_growth: f64,
    /// Includes the pallet base.
    pub height_growth: f64,
    pub weight_factor: f64,
    pub weight_addition: f64,

    pub material_per_m2: f64,
    pub labor_per_unit: f64,
    pub vacuum_labor_multiplier: f64,
    pub fumigation_fee: f64,
    /// Customs and document handling, charged on every quote.
    pub handling_fee: f64,
}

impl Default for PackingRates {
    fn default() -> Self {
        PackingRates {
            length_growth: 10.0,
            width_growth: 10.0,
            height_growth: 15.0,
            weight_factor: 1.1,
            weight_addition: 10.0,

            material_per_m2: 15_000.0,
            labor_per_unit: 30_000.0,
            vacuum_labor_multiplier: 1.5,
            fumigation_fee: 50_000.0,
            handling_fee: 35_000.0,
        }
    }
}

impl PackingRates {
    pub(crate) fn rates(&self) -> [f64; 4] {
        [
            self.material_per_m2,
            self.labor_per_unit,
            self.fumigation_fee,
            self.handling_fee,
        ]
    }

    /// Returns the item as it will be shipped.
    pub fn pack(&self, item: &CargoItem, packing: PackingType) -> PackedItem {
        if !packing.is_packed() {
            return PackedItem {
                length: item.length,
                width: item.width,
                height: item.height,
                weight: item.weight,
                quantity: item.quantity,
            };
        }
        PackedItem {
            length: item.length + self.length_growth,
            width: item.width + self.width_growth,
            height: item.height + self.height_growth,
            weight: item.weight * self.weight_factor + self.weight_addition,
            quantity: item.quantity,
        }
    }
}

/// A box type after packing. Per-unit measures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedItem {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    pub quantity: u32,
}

impl PackedItem {
    /// Outer surface area of one unit in m².
    pub fn surface_area_m2(&self) -> f64 {
        2.0 * (self.length * self.width + self.length * self.height + self.width * self.height)
            / CM2_PER_M2
    }
}

/// Packing and handling cost lines.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PackingCost {
    pub material: f64,
    pub labor: f64,
    pub fumigation: f64,
    pub handling: f64,
}

impl PackingCost {
    pub fn total(&self) -> f64 {
        self.material + self.labor + self.fumigation + self.handling
    }
}

/// Packs every item and prices the packing.
///
/// `manual_override` is honoured when it is zero or more; it becomes the
/// material line and zeroes labor, fumigation and handling.
pub fn pack_items(
    items: &[CargoItem],
    packing: PackingType,
    manual_override: Option<f64>,
    rates: &PackingRates,
) -> (Vec<PackedItem>, PackingCost) {
    let packed: Vec<PackedItem> = items.iter().map(|item| rates.pack(item, packing)).collect();

    if let Some(all_in) = manual_override.filter(|v| *v >= 0.0) {
        return (
            packed,
            PackingCost {
                material: all_in,
                ..PackingCost::default()
            },
        );
    }

    let mut cost = PackingCost {
        handling: rates.handling_fee,
        ..PackingCost::default()
    };
    if !packing.is_packed() {
        return (packed, cost);
    }

    for unit in &packed {
        let qty = unit.quantity as f64;
        cost.material += unit.surface_area_m2() * rates.material_per_m2 * qty;
        cost.labor += rates.labor_per_unit * qty;
        if packing == PackingType::Vacuum {
            // Applied to the running total, so it compounds per item.
            cost.labor *= rates.vacuum_labor_multiplier;
        }
    }
    if !packed.is_empty() {
        cost.fumigation = rates.fumigation_fee;
    }

    (packed, cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(l: f64, w: f64, h: f64, kg: f64, qty: u32) -> CargoItem {
        CargoItem::new(l, w, h, kg, qty)
    }

    #[test]
    fn test_unpacked_items_keep_their_size() {
        let rates = PackingRates::default();
        let (packed, cost) = pack_items(&[item(50.0, 40.0, 30.0, 12.0, 2)], PackingType::None, None, &rates);
        assert_eq!(packed[0].length, 50.0);
        assert_eq!(packed[0].weight, 12.0);
        assert_eq!(cost.material, 0.0);
        assert_eq!(cost.labor, 0.0);
        assert_eq!(cost.fumigation, 0.0);
        assert_eq!(cost.handling, rates.handling_fee);
    }

    #[test]
    fn test_packing_grows_box_and_weight() {
        let rates = PackingRates::default();
        let p = rates.pack(&item(50.0, 40.0, 30.0, 20.0, 1), PackingType::WoodenBox);
        assert_eq!((p.length, p.width, p.height), (60.0, 50.0, 45.0));
        assert!((p.weight - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_material_uses_grown_surface() {
        let rates = PackingRates::default();
        let (packed, cost) = pack_items(&[item(90.0, 90.0, 85.0, 10.0, 3)], PackingType::Skid, None, &rates);
        // grown 100 × 100 × 100 → 6 m² per unit
        assert!((packed[0].surface_area_m2() - 6.0).abs() < 1e-9);
        assert!((cost.material - 6.0 * 15_000.0 * 3.0).abs() < 1e-6);
        assert_eq!(cost.labor, 30_000.0 * 3.0);
        assert_eq!(cost.fumigation, rates.fumigation_fee);
        assert_eq!(cost.handling, rates.handling_fee);
    }

    #[test]
    fn test_vacuum_labor_compounds_across_items() {
        let rates = PackingRates::default();
        let items = [item(10.0, 10.0, 10.0, 1.0, 1), item(10.0, 10.0, 10.0, 1.0, 1)];
        let (_, cost) = pack_items(&items, PackingType::Vacuum, None, &rates);
        // ((30k × 1.5) + 30k) × 1.5 = 112.5k, not 2 × 45k
        assert!((cost.labor - 112_500.0).abs() < 1e-6);
    }

    #[test]
    fn test_fumigation_charged_once() {
        let rates = PackingRates::default();
        let items = [item(10.0, 10.0, 10.0, 1.0, 5), item(20.0, 10.0, 10.0, 1.0, 2)];
        let (_, cost) = pack_items(&items, PackingType::WoodenBox, None, &rates);
        assert_eq!(cost.fumigation, rates.fumigation_fee);
    }

    #[test]
    fn test_manual_override_is_all_in() {
        let rates = PackingRates::default();
        let (packed, cost) = pack_items(&[item(50.0, 40.0, 30.0, 20.0, 4)], PackingType::WoodenBox, Some(250_000.0), &rates);
        assert_eq!(cost.material, 250_000.0);
        assert_eq!(cost.labor, 0.0);
        assert_eq!(cost.fumigation, 0.0);
        assert_eq!(cost.handling, 0.0);
        // Boxes still grow: the override replaces cost, not packing.
        assert_eq!(packed[0].length, 60.0);
    }

    #[test]
    fn test_zero_override_is_honoured_and_negative_ignored() {
        let rates = PackingRates::default();
        let items = [item(50.0, 40.0, 30.0, 20.0, 1)];
        let (_, zero) = pack_items(&items, PackingType::Skid, Some(0.0), &rates);
        assert_eq!(zero.total(), 0.0);

        let (_, negative) = pack_items(&items, PackingType::Skid, Some(-1.0), &rates);
        assert_eq!(negative.handling, rates.handling_fee);
        assert!(negative.material > 0.0);
    }
}
