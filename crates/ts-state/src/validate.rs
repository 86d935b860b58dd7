//! Dimension and physical-bounds checks on pair inputs.

use crate::error::{StateError, StateResult};
use crate::pair::PropertyPair;
use crate::property::Property;
use crate::units::{Dimension, Quantity, Unit};
use ts_core::ensure_finite;

/// Check one input value's dimension against its property.
pub fn check_dimension(property: Property, value: &Quantity) -> StateResult<()> {
    let matches = match property.dimension() {
        // exact kind, not dimensional algebra
        Dimension::Dimensionless => matches!(value.unit(), Unit::Dimensionless | Unit::Percent),
        expected => value.dimension() == expected,
    };
    if matches {
        Ok(())
    } else {
        Err(StateError::DimensionMismatch {
            property: property.symbol(),
            expected: property.dimension(),
        })
    }
}

/// Check an input's SI magnitude against its physical range.
pub fn check_bounds(property: Property, si: f64) -> StateResult<()> {
    let reason = match property {
        Property::T | Property::P | Property::V if si < 0.0 => {
            "must be non-negative in absolute units"
        }
        // the backend takes density, 1/v
        Property::V if si == 0.0 => "specific volume must be positive",
        Property::X if !(0.0..=1.0).contains(&si) => "quality must lie in [0, 1]",
        _ => return Ok(()),
    };
    Err(StateError::OutOfBounds {
        property: property.symbol(),
        reason,
    })
}

/// Validate both inputs of a pair and return their SI magnitudes, in pair order.
pub fn validate(pair: PropertyPair, first: &Quantity, second: &Quantity) -> StateResult<(f64, f64)> {
    check_dimension(pair.first(), first)?;
    check_dimension(pair.second(), second)?;

    let a = ensure_finite(first.si_value(), pair.first().symbol())?;
    let b = ensure_finite(second.si_value(), pair.second().symbol())?;
    check_bounds(pair.first(), a)?;
    check_bounds(pair.second(), b)?;
    Ok((a, b))
}
