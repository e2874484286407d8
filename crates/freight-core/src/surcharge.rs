//! # Surcharge Classifier
//!
//! Per-unit carrier surcharges for oversize and heavy packages.
//!
//! ## Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sides sorted: L ≥ S ≥ T        girth = L + 2S + 2T                     │
//! │                                                                         │
//! │  1. Primary tier (first match wins)                                    │
//! │       OverMax       L > max_length | kg > max_weight | girth > max     │
//! │       LargePackage  L + girth > large_package_threshold                │
//! │                                                                         │
//! │  2. Weight addition   kg > ahs_weight                                  │
//! │       allowed with no tier or with LargePackage, never with OverMax    │
//! │                                                                         │
//! │  3. Handling addition (first match wins)                               │
//! │       only when no tier AND no weight addition fired                   │
//! │       LongSide    L > ahs_long_side                                    │
//! │       SecondSide  S > ahs_second_side                                  │
//! │       Packing     WOODEN_BOX or SKID                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The asymmetry is deliberate and mirrors the carrier tariff: OverMax
//! suppresses everything below it, LargePackage still stacks the weight
//! addition. Do not reorder without checking the published tariff.

use serde::{Deserialize, Serialize};

use crate::geometry::sorted_desc;
use crate::types::PackingType;

// =============================================================================
// Rules
// =============================================================================

/// Thresholds (cm, kg) and per-unit rates for carrier surcharges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurchargeRules {
    pub max_length: f64,
    pub max_weight: f64,
    pub max_girth: f64,
    /// Compared against longest side + girth.
    pub large_package_threshold: f64,
    pub ahs_weight: f64,
    pub ahs_long_side: f64,
    pub ahs_second_side: f64,

    pub over_max_rate: f64,
    pub large_package_rate: f64,
    pub ahs_weight_rate: f64,
    pub ahs_dimension_rate: f64,
}

impl Default for SurchargeRules {
    fn default() -> Self {
        SurchargeRules {
            max_length: 274.0,
            max_weight: 70.0,
            max_girth: 400.0,
            large_package_threshold: 400.0,
            ahs_weight: 25.0,
            ahs_long_side: 122.0,
            ahs_second_side: 76.0,

            over_max_rate: 1_500_000.0,
            large_package_rate: 150_000.0,
            ahs_weight_rate: 45_000.0,
            ahs_dimension_rate: 35_000.0,
        }
    }
}

impl SurchargeRules {
    pub(crate) fn rates(&self) -> [f64; 4] {
        [
            self.over_max_rate,
            self.large_package_rate,
            self.ahs_weight_rate,
            self.ahs_dimension_rate,
        ]
    }
}

/// Measurements of one physical unit, after export packing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitMeasure {
    pub longest: f64,
    pub second: f64,
    pub third: f64,
    pub girth: f64,
    pub weight: f64,
}

impl UnitMeasure {
    pub fn new(length: f64, width: f64, height: f64, weight: f64) -> Self {
        let [longest, second, third] = sorted_desc(length, width, height);
        UnitMeasure {
            longest,
            second,
            third,
            girth: longest + 2.0 * second + 2.0 * third,
            weight,
        }
    }
}

// =============================================================================
// Primary Tier
// =============================================================================

/// Exclusive size/weight tier. At most one applies per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeTier {
    OverMax,
    LargePackage,
}

impl SurchargeTier {
    /// Scan order. The first tier that matches is the only one applied.
    pub const PRECEDENCE: [SurchargeTier; 2] = [SurchargeTier::OverMax, SurchargeTier::LargePackage];

    fn matches(&self, unit: &UnitMeasure, rules: &SurchargeRules) -> bool {
        match self {
            SurchargeTier::OverMax => {
                unit.longest > rules.max_length
                    || unit.weight > rules.max_weight
                    || unit.girth > rules.max_girth
            }
            SurchargeTier::LargePackage => {
                unit.longest + unit.girth > rules.large_package_threshold
            }
        }
    }

    fn rate(&self, rules: &SurchargeRules) -> f64 {
        match self {
            SurchargeTier::OverMax => rules.over_max_rate,
            SurchargeTier::LargePackage => rules.large_package_rate,
        }
    }

    /// Whether the weight addition may stack on this tier.
    pub fn stacks_weight_addition(&self) -> bool {
        matches!(self, SurchargeTier::LargePackage)
    }

    fn reason(&self) -> String {
        match self {
            SurchargeTier::OverMax => "Over Maximum Limits".to_string(),
            SurchargeTier::LargePackage => "Large Package".to_string(),
        }
    }
}

// =============================================================================
// Additions
// =============================================================================

/// Additional-handling charges below the primary tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlingAddition {
    Weight,
    LongSide,
    SecondSide,
    Packing,
}

impl HandlingAddition {
    /// Scan order for the dimension/packing addition.
    pub const DIMENSION_PRECEDENCE: [HandlingAddition; 3] = [
        HandlingAddition::LongSide,
        HandlingAddition::SecondSide,
        HandlingAddition::Packing,
    ];

    fn matches(&self, unit: &UnitMeasure, packing: PackingType, rules: &SurchargeRules) -> bool {
        match self {
            HandlingAddition::Weight => unit.weight > rules.ahs_weight,
            HandlingAddition::LongSide => unit.longest > rules.ahs_long_side,
            HandlingAddition::SecondSide => unit.second > rules.ahs_second_side,
            HandlingAddition::Packing => packing.needs_handling(),
        }
    }

    fn rate(&self, rules: &SurchargeRules) -> f64 {
        match self {
            HandlingAddition::Weight => rules.ahs_weight_rate,
            _ => rules.ahs_dimension_rate,
        }
    }

    fn reason(&self, rules: &SurchargeRules) -> String {
        match self {
            HandlingAddition::Weight => {
                format!("Additional Handling (weight > {}kg)", rules.ahs_weight)
            }
            HandlingAddition::LongSide => {
                format!("Additional Handling (longest side > {}cm)", rules.ahs_long_side)
            }
            HandlingAddition::SecondSide => {
                format!("Additional Handling (second side > {}cm)", rules.ahs_second_side)
            }
            HandlingAddition::Packing => "Additional Handling (crated/palletised)".to_string(),
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Surcharges that apply to a single unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSurcharge {
    pub tier: Option<SurchargeTier>,
    pub additions: Vec<HandlingAddition>,
    /// Sum of the tier rate and every addition rate.
    pub amount: f64,
    reasons: Vec<String>,
}

impl UnitSurcharge {
    pub fn is_empty(&self) -> bool {
        self.tier.is_none() && self.additions.is_empty()
    }

    /// One warning line for a group of identical units, or None if nothing fired.
    pub fn describe(&self, item_index: usize, quantity: u32) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(format!(
            "Item {}: {} surcharge applied ({:.0} x {} units)",
            item_index + 1,
            self.reasons.join(" + "),
            self.amount,
            quantity
        ))
    }
}

/// Classifies one unit. Dimensions and weight must already include packing.
pub fn classify_unit(unit: &UnitMeasure, packing: PackingType, rules: &SurchargeRules) -> UnitSurcharge {
    let mut amount = 0.0;
    let mut reasons = Vec::new();
    let mut additions = Vec::new();

    let tier = SurchargeTier::PRECEDENCE
        .into_iter()
        .find(|t| t.matches(unit, rules));
    if let Some(t) = tier {
        amount += t.rate(rules);
        reasons.push(t.reason());
    }

    let weight_allowed = tier.map_or(true, |t| t.stacks_weight_addition());
    if weight_allowed && HandlingAddition::Weight.matches(unit, packing, rules) {
        additions.push(HandlingAddition::Weight);
    } else if tier.is_none() {
        if let Some(add) = HandlingAddition::DIMENSION_PRECEDENCE
            .into_iter()
            .find(|a| a.matches(unit, packing, rules))
        {
            additions.push(add);
        }
    }

    for add in &additions {
        amount += add.rate(rules);
        reasons.push(add.reason(rules));
    }

    UnitSurcharge {
        tier,
        additions,
        amount,
        reasons,
    }
}
