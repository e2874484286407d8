//! # freight-core: Pure Pricing Engine for International Freight Quotes
//!
//! Turns a shipment description into an itemised cost breakdown and a
//! customer-facing price: domestic pickup, export packing, international
//! carrier leg and duty.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Freight Quote Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Quote form / freight-quote CLI                        │   │
//! │  │    request JSON ──► validate ──► quote ──► render / save        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ QuoteInput                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ freight-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   geometry ─┬─► surcharge ─┐                                    │   │
//! │  │   packing ──┘              ├─► engine ──► margin                │   │
//! │  │   zone ──► international ──┤                                    │   │
//! │  │   domestic ────────────────┘                                    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO RANDOMNESS • TABLES INJECTED          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Request/response types (QuoteInput, QuoteResult, ...)
//! - [`money`] - Whole-unit `Money` for the customer price
//! - [`tables`] - Injected tariff configuration
//! - [`geometry`], [`zone`], [`surcharge`], [`packing`], [`domestic`],
//!   [`carrier`], [`international`], [`margin`] - pipeline stages
//! - [`engine`] - The orchestrator
//! - [`validation`] - Caller-side request checks
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use freight_core::{CargoItem, Carrier, Engine, PackingType, QuoteInput, TradeTerm};
//!
//! let engine = Engine::default();
//! let quote = engine.quote(&QuoteInput {
//!     origin_country: "KR".into(),
//!     destination_country: "US".into(),
//!     destination_postal: "90210".into(),
//!     pickup_region: "SEOUL".into(),
//!     remote_pickup: false,
//!     trade_term: TradeTerm::Dap,
//!     packing_type: PackingType::WoodenBox,
//!     carrier: Carrier::Ups,
//!     items: vec![CargoItem::new(60.0, 40.0, 40.0, 18.0, 2)],
//!     margin_pct: 20.0,
//!     duty_estimate: 0.0,
//!     fx_rate: 1350.0,
//!     fuel_surcharge_pct: 18.5,
//!     manual_domestic_cost: None,
//!     manual_packing_cost: None,
//! });
//!
//! assert_eq!(quote.applied_zone, "USA - West");
//! assert_eq!(quote.total_quote.units() % 100, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod carrier;
pub mod domestic;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod international;
pub mod margin;
pub mod money;
pub mod packing;
pub mod surcharge;
pub mod tables;
pub mod types;
pub mod validation;
pub mod zone;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use engine::Engine;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use tables::RateTables;
pub use types::*;
pub use zone::Zone;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum units of a single box type in one quote.
///
/// ## Business Reason
/// Larger consignments go to the sea-freight desk, not the courier quote.
pub const MAX_ITEM_QUANTITY: u32 = 999;
