//! # Validation Module
//!
//! Request validation for callers of the engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Quote form / CLI                                             │
//! │  ├── Deserialization (types, enums)                                    │
//! │  └── THIS MODULE: shape checks before quoting                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine::quote                                                │
//! │  ├── Trusts shape, never fails                                         │
//! │  └── Business sanity → warnings (thin margin, no rate, over capacity)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine does not call these itself. A request that skips validation
//! still gets a result, just possibly a degenerate one.
//!
//! ## Usage
//! ```rust
//! use freight_core::validation::{validate_dimension, validate_fx_rate};
//!
//! assert!(validate_dimension("length", 120.0).is_ok());
//! assert!(validate_fx_rate(0.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::tables::RateTables;
use crate::types::QuoteInput;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

fn finite(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite {
            field: field.to_string(),
        })
    }
}

/// Validates a box dimension or weight.
///
/// ## Rules
/// - Must be finite
/// - Must be positive (> 0)
pub fn validate_dimension(field: &str, value: f64) -> ValidationResult<()> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a unit count.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: MAX_ITEM_QUANTITY as f64,
        });
    }
    Ok(())
}

/// Validates the FX rate (local currency per USD).
pub fn validate_fx_rate(rate: f64) -> ValidationResult<()> {
    finite("fx_rate", rate)?;
    if rate <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "fx_rate".to_string(),
        });
    }
    Ok(())
}

/// Validates the margin percent.
///
/// Out-of-range values are allowed (the engine clamps them); only
/// non-finite values are rejected.
pub fn validate_margin(pct: f64) -> ValidationResult<()> {
    finite("margin_pct", pct)
}

/// Validates a percent or amount that must be zero or more.
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a pickup region code against the domestic rate table.
pub fn validate_region(region: &str, tables: &RateTables) -> ValidationResult<()> {
    let code = region.trim().to_ascii_uppercase();
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "pickup_region".to_string(),
        });
    }
    if !tables.domestic.region_rates.contains_key(&code) {
        return Err(ValidationError::NotAllowed {
            field: "pickup_region".to_string(),
            allowed: tables.domestic.region_rates.keys().cloned().collect(),
        });
    }
    Ok(())
}

// =============================================================================
// Request Validator
// =============================================================================

/// Validates a full request. Returns the first problem found.
///
/// ## Checks
/// - countries present, at least one item
/// - every item: positive finite sides and weight, quantity 1..=MAX
/// - FX rate positive, margin finite, fuel % and duty non-negative
/// - manual overrides, when present, finite and non-negative
/// - pickup region known to the tables
pub fn validate_quote_input(input: &QuoteInput, tables: &RateTables) -> ValidationResult<()> {
    for (field, value) in [
        ("origin_country", &input.origin_country),
        ("destination_country", &input.destination_country),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    if input.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }
    for (i, item) in input.items.iter().enumerate() {
        let n = i + 1;
        validate_dimension(&format!("items[{}].length", n), item.length)?;
        validate_dimension(&format!("items[{}].width", n), item.width)?;
        validate_dimension(&format!("items[{}].height", n), item.height)?;
        validate_dimension(&format!("items[{}].weight", n), item.weight)?;
        validate_quantity(item.quantity)?;
    }

    validate_fx_rate(input.fx_rate)?;
    validate_margin(input.margin_pct)?;
    validate_non_negative("fuel_surcharge_pct", input.fuel_surcharge_pct)?;
    validate_non_negative("duty_estimate", input.duty_estimate)?;
    if let Some(v) = input.manual_domestic_cost {
        validate_non_negative("manual_domestic_cost", v)?;
    }
    if let Some(v) = input.manual_packing_cost {
        validate_non_negative("manual_packing_cost", v)?;
    }

    validate_region(&input.pickup_region, tables)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CargoItem, Carrier, PackingType, TradeTerm};

    fn input() -> QuoteInput {
        QuoteInput {
            origin_country: "KR".to_string(),
            destination_country: "CN".to_string(),
            destination_postal: "518000".to_string(),
            pickup_region: "Incheon".to_string(),
            remote_pickup: false,
            trade_term: TradeTerm::Cif,
            packing_type: PackingType::Skid,
            carrier: Carrier::Dhl,
            items: vec![CargoItem::new(100.0, 80.0, 60.0, 45.0, 1)],
            margin_pct: 15.0,
            duty_estimate: 0.0,
            fx_rate: 1_350.0,
            fuel_surcharge_pct: 18.0,
            manual_domestic_cost: None,
            manual_packing_cost: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_quote_input(&input(), &RateTables::default()).is_ok());
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut req = input();
        req.items.clear();
        let err = validate_quote_input(&req, &RateTables::default()).unwrap_err();
        assert_eq!(err.to_string(), "items is required");
    }

    #[test]
    fn test_bad_dimension_names_the_item() {
        let mut req = input();
        req.items.push(CargoItem::new(10.0, -1.0, 10.0, 1.0, 1));
        let err = validate_quote_input(&req, &RateTables::default()).unwrap_err();
        assert_eq!(err.to_string(), "items[2].width must be positive");
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_numbers() {
        assert!(validate_fx_rate(1_350.0).is_ok());
        assert!(validate_fx_rate(-1.0).is_err());
        assert!(validate_fx_rate(f64::NAN).is_err());
        assert!(validate_margin(150.0).is_ok());
        assert!(validate_margin(f64::INFINITY).is_err());
        assert!(validate_non_negative("fuel", 0.0).is_ok());
        assert!(validate_non_negative("fuel", -0.1).is_err());
    }

    #[test]
    fn test_validate_region() {
        let tables = RateTables::default();
        assert!(validate_region("seoul", &tables).is_ok());
        assert!(matches!(
            validate_region("", &tables),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_region("ATLANTIS", &tables),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_negative_override_rejected() {
        let mut req = input();
        req.manual_packing_cost = Some(-5.0);
        assert!(validate_quote_input(&req, &RateTables::default()).is_err());
    }
}
