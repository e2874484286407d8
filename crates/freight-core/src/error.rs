//! # Error Types
//!
//! Error types for freight-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  freight-core errors (this file)                                       │
//! │  ├── CoreError        - Rate table problems found at Engine::new       │
//! │  └── ValidationError  - Request shape failures (caller-side checks)    │
//! │                                                                         │
//! │  quote-cli errors (app)                                                │
//! │  └── CliError         - Config file / request file failures            │
//! │                                                                         │
//! │  NOT an error: business-sanity problems (no published rate, shipment   │
//! │  over capacity, thin margin). Those become QuoteResult.warnings.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (region, tier index, field)
//! 3. Errors are enum variants, never String
//! 4. `Engine::quote` never returns an error

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Rate table configuration errors.
///
/// These are detected once, when an [`Engine`](crate::engine::Engine) is
/// built from a [`RateTables`](crate::tables::RateTables). A table that
/// passes these checks can price any well-formed request.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The domestic truck tier list is empty.
    #[error("Domestic tier list is empty")]
    NoTruckTiers,

    /// Truck tiers must be ordered smallest to largest.
    ///
    /// ## When This Occurs
    /// - A tier's weight or volume ceiling is below the previous tier's
    /// - Usually a hand-edited config file with rows swapped
    #[error("Truck tier {index} ({label}) is smaller than the tier before it")]
    TiersNotAscending { index: usize, label: String },

    /// A region's rate row does not have one rate per tier.
    #[error("Region {region} has {found} rates, expected {expected}")]
    RegionRateCount {
        region: String,
        expected: usize,
        found: usize,
    },

    /// A published rate is negative or not finite.
    #[error("Invalid rate in {table}: {value}")]
    InvalidRate { table: String, value: f64 },

    /// The freight-tier index used for remote surcharges points past the tier list.
    #[error("Freight tier index {index} out of range (tiers: {len})")]
    FreightTierOutOfRange { index: usize, len: usize },

    /// A volume discount factor is outside (0, 1].
    #[error("Volume discount factor {factor} above {min_weight}kg must be in (0, 1]")]
    InvalidDiscount { min_weight: f64, factor: f64 },

    /// A postal code range has start > end.
    #[error("Postal range {start}-{end} is inverted")]
    InvertedPostalRange { start: u32, end: u32 },

    /// A zone key used by the classifier has no label.
    #[error("Zone {0} has no label")]
    UnlabeledZone(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Request validation errors.
///
/// The engine trusts the *shape* of its input. Callers run
/// [`validate_quote_input`](crate::validation::validate_quote_input) before
/// quoting and surface these to the user.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// NaN or infinity where a finite number is required.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
