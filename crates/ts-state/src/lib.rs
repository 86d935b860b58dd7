//! ts-state: strongly typed thermodynamic states of pure substances.
//!
//! Provides:
//! - Substance allow-list and the property alphabet (T, p, v, u, h, s, x, cp, cv)
//! - Dimensioned quantities with runtime dimension checks and text parsing
//! - Property-pair registry (allowed / unsupported / invalid)
//! - `State`: resolves every property from any allowed pair in one backend call
//! - SI / EE display profiles with a process-wide default
//! - Process traces and the saturation dome
//!
//! # Architecture
//!
//! All physics is delegated to an [`EosBackend`]. The default backend is
//! CoolProp (via `rfluids`); each `State` owns its own backend handle.
//!
//! # Example
//!
//! ```no_run
//! use ts_state::{Property, Quantity, State, Unit};
//!
//! let state = State::builder("water")
//!     .with(Property::T, Quantity::new(400.0, Unit::Kelvin))
//!     .with(Property::P, "1 atm".parse::<Quantity>().unwrap())
//!     .build()
//!     .unwrap();
//! println!("{}", state.h().unwrap());
//! assert!(state.x().unwrap().is_none());
//! ```

pub mod backend;
pub mod coolprop;
pub mod error;
pub mod pair;
pub mod process;
pub mod profile;
pub mod property;
pub mod sampling;
pub mod state;
pub mod substance;
pub mod units;
pub mod validate;

#[cfg(test)]
mod testing;

// Re-exports for ergonomics
pub use backend::{BackendError, EosBackend, OutputKey};
pub use coolprop::CoolProp;
pub use error::{StateError, StateResult};
pub use pair::{InputSelector, PairClass, PairRegistry, PropertyPair};
pub use process::{ProcessKind, SaturationDome, saturation_dome, trace_process};
pub use profile::{UnitProfile, default_units, set_default_units, set_default_units_tag};
pub use property::{Phase, Property};
pub use sampling::{Spacing, Sweep};
pub use state::{Properties, State, StateBuilder};
pub use substance::Substance;
pub use units::{Dimension, Quantity, Unit, UnitError};
