//! State resolution errors.

use crate::backend::BackendError;
use crate::units::{Dimension, UnitError};
use thiserror::Error;
use ts_core::TsError;

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors raised while building, resolving or reading a [`State`](crate::State).
///
/// Every failure is immediate; nothing is retried and a failed resolution
/// leaves the previous properties of the state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Substance not in the allow-list.
    #[error("{name} is not an allowed substance. Choose one of {allowed}.")]
    UnknownSubstance { name: String, allowed: String },

    /// One property, or more than two, supplied.
    #[error("Incorrect number of properties specified ({count}). Must be 2 or 0.")]
    InvalidArity { count: usize },

    /// Name is neither a property nor a known property pair.
    #[error("Unknown attribute {name}")]
    UnknownProperty { name: String },

    /// Structurally valid pair that the backend cannot resolve.
    #[error("The pair of input properties entered ({pair}) isn't supported yet. Sorry!")]
    UnsupportedPair { pair: String },

    /// Supplied quantity has the wrong physical dimension.
    #[error("The dimensions for {property} must be {expected}")]
    DimensionMismatch {
        property: &'static str,
        expected: Dimension,
    },

    /// Negative absolute T/p/v, or quality outside [0, 1].
    #[error("The value of {property} is physically invalid: {reason}")]
    OutOfBounds {
        property: &'static str,
        reason: &'static str,
    },

    /// The two inputs coincide on a phase boundary and do not fix the state.
    #[error("The given values for {first} and {second} are not independent.")]
    NotIndependent {
        first: &'static str,
        second: &'static str,
    },

    /// Any other equation-of-state failure.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// A label whose `Display` implementation failed.
    #[error("The given label could not be converted to a string")]
    LabelNotStringable,

    /// Units tag other than "SI", "EE" or raw.
    #[error("The given units '{tag}' are not supported. Must be 'SI', 'EE', or None.")]
    UnsupportedUnits { tag: String },

    /// Property read before any pair was assigned.
    #[error("State has no resolved properties yet; assign a property pair first")]
    Unresolved,

    /// Invalid process or sampling request.
    #[error("Invalid process: {what}")]
    Process { what: String },

    /// Text quantity could not be parsed or converted.
    #[error(transparent)]
    UnitParse(#[from] UnitError),

    #[error(transparent)]
    Core(#[from] TsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StateError::UnsupportedPair { pair: "Tu".into() };
        assert!(err.to_string().contains("(Tu)"));

        let err = StateError::DimensionMismatch {
            property: "T",
            expected: Dimension::Temperature,
        };
        assert!(err.to_string().contains("for T"));
        assert!(err.to_string().contains("[temperature]"));
    }

    #[test]
    fn backend_errors_convert() {
        let err: StateError = BackendError::new("CoolProp failed").into();
        assert!(matches!(err, StateError::Backend(_)));
        assert!(err.to_string().contains("CoolProp"));
    }

    #[test]
    fn core_errors_convert() {
        let err: StateError = TsError::NonFinite {
            what: "p",
            value: f64::NAN,
        }
        .into();
        assert!(err.to_string().contains("Non-finite"));
    }
}
