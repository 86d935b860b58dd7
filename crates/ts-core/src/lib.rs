//! ts-core: stable foundation for thermostate.
//!
//! Contains:
//! - units (uom SI types for the thermodynamic properties + constructors)
//! - numeric (tolerances for comparing equation-of-state results, finiteness checks)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports
pub use error::{TsError, TsResult};
pub use numeric::*;
pub use units::*;
