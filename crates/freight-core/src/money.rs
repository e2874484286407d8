//! # Money Module
//!
//! Provides the `Money` type for the customer-facing quote amount.
//!
//! ## Where Floats Stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  COST SIDE (f64)                    PRICE SIDE (Money, i64)             │
//! │                                                                         │
//! │  rate × kg × discount               revenue ──► round UP to 100 ──►    │
//! │  base × fuel %                                   Money(1_234_600)       │
//! │  C / (1 - m)                                                            │
//! │                                                                         │
//! │  Costs are products of percentages and per-kg rates, so they stay      │
//! │  floating point. The quote the customer sees is a whole number of      │
//! │  local currency units and is never rounded down.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use freight_core::money::Money;
//!
//! let quote = Money::ceil_to_increment(1_234_501.2, 100);
//! assert_eq!(quote.units(), 1_234_600);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A whole amount of local currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: same representation as the rest of the back office
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No minor units**: quotes are issued in whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Rounds an amount UP to the next multiple of `increment`.
    ///
    /// ## Always Up
    /// ```text
    /// 1_234_500.0  → 1_234_500   (already a multiple)
    /// 1_234_500.01 → 1_234_600
    /// 1_234_599.99 → 1_234_600
    /// ```
    /// An increment below 1 is treated as 1.
    ///
    /// ## Example
    /// ```rust
    /// use freight_core::money::Money;
    ///
    /// assert_eq!(Money::ceil_to_increment(100.0, 100).units(), 100);
    /// assert_eq!(Money::ceil_to_increment(100.5, 100).units(), 200);
    /// ```
    pub fn ceil_to_increment(amount: f64, increment: i64) -> Self {
        let step = increment.max(1) as f64;
        Money::from_units(((amount / step).ceil() * step) as i64)
    }

    /// Converts to USD at `fx_rate` local units per dollar.
    ///
    /// A zero rate yields infinity; callers validate the rate first.
    #[inline]
    pub fn to_usd(&self, fx_rate: f64) -> f64 {
        self.0 as f64 / fx_rate
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Groups thousands for log and CLI output.
///
/// ## Note
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-{}", grouped)
        } else {
            f.write_str(&grouped)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
