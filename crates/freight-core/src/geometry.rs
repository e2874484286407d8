//! # Geometry
//!
//! Volumetric weight and cubic volume from box dimensions (cm).
//!
//! Carriers bill the greater of actual and volumetric weight, and the
//! domestic truck tiers are sized by cubic volume.

/// Carrier volumetric divisor: cm³ per kilogram.
pub const VOLUMETRIC_DIVISOR: f64 = 5000.0;

const CM3_PER_M3: f64 = 1_000_000.0;

/// Volumetric weight in kg.
///
/// Each side is rounded up to the next whole centimetre before multiplying,
/// as carriers measure.
///
/// ```rust
/// use freight_core::geometry::volumetric_weight;
///
/// // 50.2 → 51
/// assert_eq!(volumetric_weight(50.2, 40.0, 30.0), 51.0 * 40.0 * 30.0 / 5000.0);
/// ```
pub fn volumetric_weight(length: f64, width: f64, height: f64) -> f64 {
    length.ceil() * width.ceil() * height.ceil() / VOLUMETRIC_DIVISOR
}

/// Cubic volume in m³. No rounding.
pub fn cubic_volume(length: f64, width: f64, height: f64) -> f64 {
    length * width * height / CM3_PER_M3
}

/// Billable weight: the greater of actual and volumetric.
#[inline]
pub fn billable_weight(actual: f64, volumetric: f64) -> f64 {
    actual.max(volumetric)
}

/// Sides sorted longest first.
pub(crate) fn sorted_desc(length: f64, width: f64, height: f64) -> [f64; 3] {
    let mut sides = [length, width, height];
    sides.sort_by(|a, b| b.total_cmp(a));
    sides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumetric_weight_rounds_sides_up() {
        assert_eq!(volumetric_weight(50.0, 50.0, 50.0), 25.0);
        assert_eq!(volumetric_weight(49.1, 49.9, 49.01), 25.0);
        assert_eq!(volumetric_weight(50.01, 50.0, 50.0), 51.0 * 2500.0 / 5000.0);
    }

    #[test]
    fn test_cubic_volume_is_raw() {
        assert_eq!(cubic_volume(100.0, 100.0, 100.0), 1.0);
        assert!((cubic_volume(10.5, 10.0, 10.0) - 0.00105).abs() < 1e-12);
    }

    #[test]
    fn test_billable_weight() {
        assert_eq!(billable_weight(10.0, 25.0), 25.0);
        assert_eq!(billable_weight(30.0, 25.0), 30.0);
    }

    #[test]
    fn test_sorted_desc() {
        assert_eq!(sorted_desc(30.0, 120.0, 80.0), [120.0, 80.0, 30.0]);
    }
}
