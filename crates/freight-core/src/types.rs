//! # Domain Types
//!
//! Request and response types for the quote engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │   QuoteInput    │        │   QuoteResult   │                        │
//! │  │  ─────────────  │ Engine │  ─────────────  │                        │
//! │  │  countries      │ ─────► │  total_quote    │                        │
//! │  │  trade_term     │        │  weights        │                        │
//! │  │  packing_type   │        │  zone / tier    │                        │
//! │  │  items[]        │        │  warnings[]     │                        │
//! │  │  fx / fuel      │        │  breakdown ──────────► CostBreakdown     │
//! │  └────────┬────────┘        └─────────────────┘                        │
//! │           │                                                             │
//! │  ┌────────▼────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CargoItem     │   │   TradeTerm     │   │  PackingType    │       │
//! │  │  l × w × h cm   │   │  EXW FOB C&F    │   │  NONE SKID      │       │
//! │  │  kg, quantity   │   │  CIF DAP DDP    │   │  WOODEN_BOX ... │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All amounts are in the same unit as the FX rate's "local currency".

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Trade Term
// =============================================================================

/// Incoterm agreed with the buyer. Decides which legs the margin is priced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeTerm {
    /// Ex Works - buyer collects.
    Exw,
    /// Free On Board - buyer arranges main carriage.
    Fob,
    /// Cost and Freight.
    #[serde(rename = "C&F")]
    #[serde(alias = "CFR")]
    Cfr,
    /// Cost, Insurance and Freight.
    Cif,
    /// Delivered At Place, duty unpaid.
    Dap,
    /// Delivered Duty Paid.
    Ddp,
}

impl TradeTerm {
    /// Whether the international leg is part of what the customer is billed.
    ///
    /// Under EXW and FOB the buyer arranges international carriage, so the
    /// leg is priced for reference only.
    pub fn bills_international(&self) -> bool {
        !matches!(self, TradeTerm::Exw | TradeTerm::Fob)
    }

    /// Whether destination duty is included in the quote.
    pub fn includes_duty(&self) -> bool {
        matches!(self, TradeTerm::Ddp)
    }
}

impl std::fmt::Display for TradeTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TradeTerm::Exw => "EXW",
            TradeTerm::Fob => "FOB",
            TradeTerm::Cfr => "C&F",
            TradeTerm::Cif => "CIF",
            TradeTerm::Dap => "DAP",
            TradeTerm::Ddp => "DDP",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Packing Type
// =============================================================================

/// Export packing applied to every item in the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackingType {
    /// Shipped in the customer's own cartons.
    #[default]
    None,
    /// Crated in a wooden box.
    WoodenBox,
    /// Strapped to a skid (pallet).
    Skid,
    /// Vacuum-sealed, then crated.
    Vacuum,
}

impl PackingType {
    /// Returns true if export packing is applied at all.
    pub fn is_packed(&self) -> bool {
        !matches!(self, PackingType::None)
    }

    /// Crated and palletised freight always needs carrier handling.
    pub fn needs_handling(&self) -> bool {
        matches!(self, PackingType::WoodenBox | PackingType::Skid)
    }
}

// =============================================================================
// Carrier
// =============================================================================

/// International carrier used for the main leg.
///
/// A closed set: each variant has a [`CarrierProfile`](crate::carrier::CarrierProfile)
/// in the rate tables. Adding a carrier means adding a variant here and a
/// profile there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Carrier {
    /// UPS Worldwide Saver.
    #[default]
    Ups,
    /// DHL Express Worldwide.
    Dhl,
    /// EMAX consolidated air.
    Emax,
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Carrier::Ups => write!(f, "UPS"),
            Carrier::Dhl => write!(f, "DHL"),
            Carrier::Emax => write!(f, "EMAX"),
        }
    }
}

// =============================================================================
// Cargo Item
// =============================================================================

/// One box type in the shipment.
///
/// Dimensions in centimetres, weight in kilograms per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CargoItem {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// Weight of a single unit.
    pub weight: f64,
    /// Number of identical units.
    pub quantity: u32,
}

impl CargoItem {
    pub fn new(length: f64, width: f64, height: f64, weight: f64, quantity: u32) -> Self {
        CargoItem {
            length,
            width,
            height,
            weight,
            quantity,
        }
    }
}

// =============================================================================
// Quote Input
// =============================================================================

/// Everything the engine needs to price one shipment.
///
/// Live market values (`fx_rate`, `fuel_surcharge_pct`) are plain fields so
/// they can be refreshed by the caller without touching the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteInput {
    /// ISO country code of the pickup country.
    pub origin_country: String,

    /// ISO country code of the destination.
    pub destination_country: String,

    /// Raw destination postal code. May be empty or contain non-digits.
    #[serde(default)]
    pub destination_postal: String,

    /// Domestic pickup region code (e.g. "SEOUL").
    pub pickup_region: String,

    /// Pickup is on a remote island.
    #[serde(default)]
    pub remote_pickup: bool,

    pub trade_term: TradeTerm,

    #[serde(default)]
    pub packing_type: PackingType,

    #[serde(default)]
    pub carrier: Carrier,

    /// Box types in the shipment. Must be non-empty.
    pub items: Vec<CargoItem>,

    /// Target margin on revenue, percent. Clamped into [0, 99] before use.
    pub margin_pct: f64,

    /// Estimated destination duty and tax. Only used for DDP.
    #[serde(default)]
    pub duty_estimate: f64,

    /// Local currency per USD.
    pub fx_rate: f64,

    /// Current carrier fuel surcharge, percent.
    pub fuel_surcharge_pct: f64,

    /// Negotiated domestic rate; replaces the table rate when positive.
    #[serde(default)]
    pub manual_domestic_cost: Option<f64>,

    /// All-in packing cost; replaces material, labor, fumigation and handling.
    #[serde(default)]
    pub manual_packing_cost: Option<f64>,
}

// =============================================================================
// Cost Breakdown
// =============================================================================

/// Itemised internal cost of a quote.
///
/// `total_cost` is the sum of every line, including legs that are only shown
/// for reference under EXW/FOB.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostBreakdown {
    pub domestic_base: f64,
    pub domestic_surcharge: f64,
    pub packing_material: f64,
    pub packing_labor: f64,
    pub packing_fumigation: f64,
    pub handling_fees: f64,
    pub carrier_base: f64,
    pub carrier_fuel: f64,
    pub carrier_war_risk: f64,
    /// Additional-handling / large-package / over-max surcharges.
    pub carrier_surcharge: f64,
    pub destination_duty: f64,
    pub total_cost: f64,
}

impl CostBreakdown {
    /// Domestic leg plus packing and handling.
    pub fn origin_subtotal(&self) -> f64 {
        self.domestic_base
            + self.domestic_surcharge
            + self.packing_material
            + self.packing_labor
            + self.packing_fumigation
            + self.handling_fees
    }

    /// International carrier leg including its surcharges.
    pub fn international_subtotal(&self) -> f64 {
        self.carrier_base + self.carrier_fuel + self.carrier_war_risk + self.carrier_surcharge
    }

    /// Sum of all lines.
    pub fn sum(&self) -> f64 {
        self.origin_subtotal() + self.international_subtotal() + self.destination_duty
    }
}

// =============================================================================
// Quote Result
// =============================================================================

/// The priced quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteResult {
    /// Customer price in local currency, rounded up to the nearest 100.
    pub total_quote: Money,

    /// `total_quote` converted at the request's FX rate.
    pub total_quote_usd: f64,

    /// Cost the margin was priced on.
    pub total_cost: f64,

    /// Unrounded revenue minus `total_cost`.
    pub profit: f64,

    /// Margin percent as requested.
    pub profit_margin: f64,

    pub actual_weight: f64,
    pub volumetric_weight: f64,
    pub billable_weight: f64,

    pub carrier: Carrier,
    pub zone_key: String,
    pub applied_zone: String,
    pub transit_time: String,
    pub truck_tier: String,

    /// Human-review notes from every stage, in pipeline order.
    pub warnings: Vec<String>,

    pub breakdown: CostBreakdown,
}

// =============================================================================
// Unit Tests
// =============================================================================
