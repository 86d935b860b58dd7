//! Equation-of-state backend seam.

use crate::pair::{InputSelector, PairRegistry};
use crate::property::Phase;
use crate::substance::Substance;
use thiserror::Error;

/// Failure reported by an equation-of-state backend.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// True when the backend rejected the inputs because they coincide on
    /// the saturation curve and do not fix the state.
    pub fn is_saturation_conflict(&self) -> bool {
        self.message.contains("Saturation pressure")
    }
}

/// Scalars read back from the backend after an update, in SI mass units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKey {
    T,
    P,
    DMass,
    UMass,
    HMass,
    SMass,
    Q,
    CpMass,
    CvMass,
}

/// A stateful property evaluator for one substance.
///
/// Each [`State`](crate::State) owns its own handle; handles are never shared
/// between states. `update` mutates the solver's internal state in place and
/// subsequent reads describe the last successful update.
pub trait EosBackend: Sized {
    /// Create a handle for a substance.
    fn open(substance: Substance) -> Result<Self, BackendError>;

    /// Backend family name, for logging.
    fn name(&self) -> &str;

    /// Solve for the state fixed by two inputs, given in the selector's
    /// argument order and in SI mass units.
    fn update(
        &mut self,
        selector: InputSelector,
        first: f64,
        second: f64,
    ) -> Result<(), BackendError>;

    fn output(&self, key: OutputKey) -> Result<f64, BackendError>;

    fn phase(&self) -> Result<Phase, BackendError>;

    /// Lowest temperature the fluid model covers [K].
    fn t_min(&self) -> Result<f64, BackendError>;

    /// Critical temperature [K].
    fn t_critical(&self) -> Result<f64, BackendError>;

    /// Pair table for this backend. The unsupported set tracks what the
    /// backend version can actually solve.
    fn registry(&self) -> &'static PairRegistry {
        PairRegistry::coolprop()
    }
}
