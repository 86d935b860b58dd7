//! Process traces between two states and the saturation dome.

use crate::backend::EosBackend;
use crate::error::{StateError, StateResult};
use crate::pair::PropertyPair;
use crate::property::Property;
use crate::sampling::{Spacing, Sweep};
use crate::state::{Properties, State};
use crate::units::Quantity;
use std::fmt;
use tracing::debug;
use ts_core::{Tolerances, nearly_equal};

/// Relative nudge applied to log10(v) of a saturated-liquid endpoint.
/// CoolProp fails intermittently when sampling starts exactly on the
/// saturated-liquid line.
pub const SATURATED_LIQUID_NUDGE: f64 = 1.0e-14;

/// Process that holds one property constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessKind {
    Isochoric,
    Isobaric,
    Isothermal,
    Isoenergetic,
    Isoenthalpic,
    Isentropic,
}

impl ProcessKind {
    pub const ALL: [ProcessKind; 6] = [
        ProcessKind::Isochoric,
        ProcessKind::Isobaric,
        ProcessKind::Isothermal,
        ProcessKind::Isoenergetic,
        ProcessKind::Isoenthalpic,
        ProcessKind::Isentropic,
    ];

    /// The property held constant.
    pub fn held(self) -> Property {
        match self {
            ProcessKind::Isochoric => Property::V,
            ProcessKind::Isobaric => Property::P,
            ProcessKind::Isothermal => Property::T,
            ProcessKind::Isoenergetic => Property::U,
            ProcessKind::Isoenthalpic => Property::H,
            ProcessKind::Isentropic => Property::S,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProcessKind::Isochoric => "isochoric",
            ProcessKind::Isobaric => "isobaric",
            ProcessKind::Isothermal => "isothermal",
            ProcessKind::Isoenergetic => "isoenergetic",
            ProcessKind::Isoenthalpic => "isoenthalpic",
            ProcessKind::Isentropic => "isentropic",
        }
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ProcessKind {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "isochoric" | "isovolumetric" => Ok(ProcessKind::Isochoric),
            "isobaric" => Ok(ProcessKind::Isobaric),
            "isothermal" => Ok(ProcessKind::Isothermal),
            "isoenergetic" => Ok(ProcessKind::Isoenergetic),
            "isoenthalpic" => Ok(ProcessKind::Isoenthalpic),
            "isentropic" => Ok(ProcessKind::Isentropic),
            other => Err(StateError::Process {
                what: format!("'{other}' is not a valid process"),
            }),
        }
    }
}

fn si_quantity(property: Property, si: f64) -> Quantity {
    Quantity::from_si(si, property.si_unit())
}

fn sampling_volume(properties: &Properties) -> f64 {
    let saturated_liquid = properties
        .x
        .is_some_and(|x| nearly_equal(x, 0.0, Tolerances::STATE));
    if saturated_liquid {
        10f64.powf(properties.v.log10() * (1.0 + SATURATED_LIQUID_NUDGE))
    } else {
        properties.v
    }
}

fn held_value(properties: &Properties, held: Property) -> StateResult<f64> {
    properties.si(held).ok_or_else(|| StateError::Process {
        what: format!("{held} is undefined"),
    })
}

/// Sample `points` states from `state_1` to `state_2` along `kind`.
///
/// Both states must be resolved, of the same substance, and agree on the
/// held property. Sampling is logarithmic in specific volume, or in pressure
/// for an isochoric process. Each sample is resolved on a fresh working state
/// with its own backend handle.
pub fn trace_process<B: EosBackend>(
    state_1: &State<B>,
    state_2: &State<B>,
    kind: ProcessKind,
    points: usize,
) -> StateResult<Vec<Properties>> {
    if state_1.substance() != state_2.substance() {
        return Err(StateError::Process {
            what: format!(
                "states must be of the same substance ({} vs {})",
                state_1.substance(),
                state_2.substance()
            ),
        });
    }
    let a = state_1.properties()?;
    let b = state_2.properties()?;

    let held = kind.held();
    let held_1 = held_value(a, held)?;
    let held_2 = held_value(b, held)?;
    if !nearly_equal(held_1, held_2, Tolerances::STATE) {
        return Err(StateError::Process {
            what: format!("{held} must be equal for a {kind} process ({held_1} vs {held_2})"),
        });
    }

    let (swept, start, end) = match kind {
        ProcessKind::Isochoric => (Property::P, a.p, b.p),
        _ => (Property::V, sampling_volume(a), sampling_volume(b)),
    };
    let sweep = Sweep::new(start, end, points, Spacing::Logarithmic)?;
    let pair = PropertyPair::new(swept, held).ok_or_else(|| StateError::Process {
        what: format!("cannot pair {swept} with {held}"),
    })?;
    debug!(substance = %state_1.substance(), %kind, %pair, points, "tracing process");

    let mut working = State::<B>::builder_for(state_1.substance().name())
        .units(None)
        .build()?;
    sweep
        .points()
        .into_iter()
        .map(|value| {
            working.set(pair, si_quantity(swept, value), si_quantity(held, held_1))?;
            working.properties().copied()
        })
        .collect()
}

/// Saturated liquid and vapour lines of one substance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaturationDome {
    /// x = 0
    pub liquid: Vec<Properties>,
    /// x = 1
    pub vapor: Vec<Properties>,
}

/// Saturation states at temperatures log-spaced from the backend's minimum
/// temperature to the critical temperature.
pub fn saturation_dome<B: EosBackend>(substance: &str, points: usize) -> StateResult<SaturationDome> {
    let mut working = State::<B>::builder_for(substance).units(None).build()?;
    let t_min = working.backend().t_min()?;
    let t_critical = working.backend().t_critical()?;
    let sweep = Sweep::new(t_min, t_critical, points, Spacing::Logarithmic)?;
    debug!(substance = %working.substance(), t_min, t_critical, points, "building saturation dome");

    let pair = PropertyPair::new(Property::T, Property::X).ok_or_else(|| StateError::Process {
        what: "cannot pair T with x".to_string(),
    })?;
    let mut dome = SaturationDome {
        liquid: Vec::with_capacity(points),
        vapor: Vec::with_capacity(points),
    };
    for t in sweep.points() {
        let t = si_quantity(Property::T, t);
        working.set(pair, t, si_quantity(Property::X, 0.0))?;
        dome.liquid.push(*working.properties()?);
        working.set(pair, t, si_quantity(Property::X, 1.0))?;
        dome.vapor.push(*working.properties()?);
    }
    Ok(dome)
}
