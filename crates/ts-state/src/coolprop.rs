//! CoolProp backend through the `rfluids` native `AbstractState`.

use crate::backend::{BackendError, EosBackend, OutputKey};
use crate::pair::InputSelector;
use crate::property::Phase;
use crate::substance::Substance;
use rfluids::{
    io::{FluidInputPair, FluidParam, FluidTrivialParam},
    native::AbstractState,
};

/// CoolProp backend family used for every substance.
pub const BACKEND: &str = "HEOS";

/// A CoolProp `AbstractState` bound to one substance.
///
/// Not `Sync`: one handle per [`State`](crate::State).
pub struct CoolProp {
    substance: Substance,
    state: AbstractState,
}

impl std::fmt::Debug for CoolProp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoolProp")
            .field("backend", &BACKEND)
            .field("fluid", &self.substance.coolprop_name())
            .finish()
    }
}

fn input_pair(selector: InputSelector) -> FluidInputPair {
    match selector {
        InputSelector::QT => FluidInputPair::QT,
        InputSelector::PQ => FluidInputPair::PQ,
        InputSelector::QSmass => FluidInputPair::QSMass,
        InputSelector::HmassQ => FluidInputPair::HMassQ,
        InputSelector::DmassQ => FluidInputPair::DMassQ,
        InputSelector::PT => FluidInputPair::PT,
        InputSelector::DmassT => FluidInputPair::DMassT,
        InputSelector::HmassT => FluidInputPair::HMassT,
        InputSelector::SmassT => FluidInputPair::SMassT,
        InputSelector::TUmass => FluidInputPair::TUMass,
        InputSelector::DmassP => FluidInputPair::DMassP,
        InputSelector::HmassP => FluidInputPair::HMassP,
        InputSelector::PSmass => FluidInputPair::PSMass,
        InputSelector::PUmass => FluidInputPair::PUMass,
        InputSelector::HmassSmass => FluidInputPair::HMassSMass,
        InputSelector::SmassUmass => FluidInputPair::SMassUMass,
        InputSelector::DmassHmass => FluidInputPair::DMassHMass,
        InputSelector::DmassSmass => FluidInputPair::DMassSMass,
        InputSelector::DmassUmass => FluidInputPair::DMassUMass,
    }
}

fn param(key: OutputKey) -> FluidParam {
    match key {
        OutputKey::T => FluidParam::T,
        OutputKey::P => FluidParam::P,
        OutputKey::DMass => FluidParam::DMass,
        OutputKey::UMass => FluidParam::UMass,
        OutputKey::HMass => FluidParam::HMass,
        OutputKey::SMass => FluidParam::SMass,
        OutputKey::Q => FluidParam::Q,
        OutputKey::CpMass => FluidParam::CpMass,
        OutputKey::CvMass => FluidParam::CvMass,
    }
}

fn backend_error(e: impl std::fmt::Display) -> BackendError {
    BackendError::new(e.to_string())
}

impl EosBackend for CoolProp {
    fn open(substance: Substance) -> Result<Self, BackendError> {
        let state = AbstractState::new(BACKEND, substance.coolprop_name()).map_err(|e| {
            BackendError::new(format!(
                "CoolProp could not load {}: {}",
                substance.coolprop_name(),
                e
            ))
        })?;
        Ok(Self { substance, state })
    }

    fn name(&self) -> &str {
        BACKEND
    }

    fn update(
        &mut self,
        selector: InputSelector,
        first: f64,
        second: f64,
    ) -> Result<(), BackendError> {
        self.state
            .update(input_pair(selector), first, second)
            .map_err(backend_error)
    }

    fn output(&self, key: OutputKey) -> Result<f64, BackendError> {
        self.state.keyed_output(param(key)).map_err(backend_error)
    }

    fn phase(&self) -> Result<Phase, BackendError> {
        let code = self
            .state
            .keyed_output(FluidParam::Phase)
            .map_err(backend_error)?;
        Ok(Phase::from_coolprop_code(code.round() as i64))
    }

    fn t_min(&self) -> Result<f64, BackendError> {
        self.state
            .keyed_output(FluidTrivialParam::TMin)
            .map_err(backend_error)
    }

    fn t_critical(&self) -> Result<f64, BackendError> {
        self.state
            .keyed_output(FluidTrivialParam::TCritical)
            .map_err(backend_error)
    }
}
