//! # Margin Solver
//!
//! Reverse-solves customer revenue from internal cost and a margin-on-revenue.
//!
//! ## Margin vs Markup
//! ```text
//! cost C = 800, margin m = 20%
//!
//!   markup on cost:     800 × 1.20       = 960   → profit share 16.7%  ❌
//!   margin on revenue:  800 / (1 - 0.20) = 1000  → profit share 20%   ✅
//! ```
//!
//! The customer price is the revenue rounded UP to the next increment, then
//! converted to USD at the request's FX rate.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Margin clamping and price rounding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginPolicy {
    /// Upper clamp for the margin percent. Must stay below 100.
    pub max_margin_pct: f64,
    /// Customer price is rounded up to a multiple of this.
    pub rounding_increment: i64,
    /// Requested margins below this produce a warning.
    pub low_margin_pct: f64,
}

impl Default for MarginPolicy {
    fn default() -> Self {
        MarginPolicy {
            max_margin_pct: 99.0,
            rounding_increment: 100,
            low_margin_pct: 10.0,
        }
    }
}

impl MarginPolicy {
    /// Clamps a requested margin into [0, max_margin_pct].
    pub fn clamp(&self, margin_pct: f64) -> f64 {
        margin_pct.clamp(0.0, self.max_margin_pct)
    }
}

/// Solved price for a cost and margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginSolution {
    /// Margin actually applied, after clamping.
    pub margin_pct: f64,
    /// Unrounded revenue.
    pub revenue: f64,
    /// `revenue - cost`.
    pub profit: f64,
    pub total_quote: Money,
    pub total_quote_usd: f64,
}

/// Solves `revenue = cost / (1 - m)` and rounds the price up.
///
/// ```rust
/// use freight_core::margin::{solve, MarginPolicy};
///
/// let s = solve(750.0, 25.0, 1000.0, &MarginPolicy::default());
/// assert_eq!(s.revenue, 1000.0);
/// assert_eq!(s.total_quote.units(), 1000);
/// ```
pub fn solve(cost: f64, margin_pct: f64, fx_rate: f64, policy: &MarginPolicy) -> MarginSolution {
    let margin_pct = policy.clamp(margin_pct);
    let share = margin_pct / 100.0;
    let revenue = if share < 1.0 { cost / (1.0 - share) } else { cost };
    let total_quote = Money::ceil_to_increment(revenue, policy.rounding_increment);

    MarginSolution {
        margin_pct,
        revenue,
        profit: revenue - cost,
        total_quote,
        total_quote_usd: total_quote.to_usd(fx_rate),
    }
}
