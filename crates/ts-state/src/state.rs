//! The `State` aggregate and its resolver.

use crate::backend::{BackendError, EosBackend, OutputKey};
use crate::coolprop::CoolProp;
use crate::error::{StateError, StateResult};
use crate::pair::{BackendInput, InputSelector, PairClass, PropertyPair};
use crate::profile::{DisplayUnits, UnitProfile, default_units};
use crate::property::{Phase, Property};
use crate::substance::Substance;
use crate::units::Quantity;
use crate::validate;
use std::fmt::{self, Write as _};
use std::marker::PhantomData;
use tracing::{debug, trace};
use ts_core::{Tolerances, nearly_equal};

/// Every property of one equilibrium point, in SI mass units.
///
/// This is the single source of truth behind all accessors of a resolved
/// [`State`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Properties {
    /// Temperature [K]
    pub t: f64,
    /// Pressure [Pa]
    pub p: f64,
    /// Specific volume [m³/kg]
    pub v: f64,
    /// Specific internal energy [J/kg]
    pub u: f64,
    /// Specific enthalpy [J/kg]
    pub h: f64,
    /// Specific entropy [J/(kg·K)]
    pub s: f64,
    /// Quality, `None` outside the two-phase region
    pub x: Option<f64>,
    /// [J/(kg·K)]
    pub cp: f64,
    /// [J/(kg·K)]
    pub cv: f64,
    pub phase: Phase,
}

impl Properties {
    /// Read the full property set from a backend after a successful update.
    pub fn read<B: EosBackend>(backend: &B) -> Result<Self, BackendError> {
        let q = backend.output(OutputKey::Q)?;
        Ok(Self {
            t: backend.output(OutputKey::T)?,
            p: backend.output(OutputKey::P)?,
            v: 1.0 / backend.output(OutputKey::DMass)?,
            u: backend.output(OutputKey::UMass)?,
            h: backend.output(OutputKey::HMass)?,
            s: backend.output(OutputKey::SMass)?,
            // CoolProp reports -1 when quality is undefined
            x: (0.0..=1.0).contains(&q).then_some(q),
            cp: backend.output(OutputKey::CpMass)?,
            cv: backend.output(OutputKey::CvMass)?,
            phase: backend.phase()?,
        })
    }

    /// SI magnitude of one property.
    pub fn si(&self, property: Property) -> Option<f64> {
        match property {
            Property::T => Some(self.t),
            Property::P => Some(self.p),
            Property::V => Some(self.v),
            Property::U => Some(self.u),
            Property::H => Some(self.h),
            Property::S => Some(self.s),
            Property::X => self.x,
            Property::Cp => Some(self.cp),
            Property::Cv => Some(self.cv),
        }
    }
}

fn stringify(label: &dyn fmt::Display) -> StateResult<String> {
    let mut out = String::new();
    write!(out, "{label}").map_err(|_| StateError::LabelNotStringable)?;
    Ok(out)
}

/// Thermodynamic state of a pure substance.
///
/// A state is either unresolved (no pair assigned yet) or fully resolved: all
/// properties, phase and specific heats describe one equilibrium point. A
/// failed assignment leaves the previous contents in place.
///
/// States compare equal when the substance matches and temperature and
/// specific volume agree within [`Tolerances::STATE`]. There is no ordering.
pub struct State<B: EosBackend = CoolProp> {
    substance: Substance,
    label: Option<String>,
    units: Option<UnitProfile>,
    display: DisplayUnits,
    properties: Option<Properties>,
    backend: B,
}

impl State<CoolProp> {
    /// Unresolved CoolProp-backed state.
    pub fn new(substance: &str) -> StateResult<Self> {
        Self::builder(substance).build()
    }

    pub fn builder(substance: &str) -> StateBuilder<CoolProp> {
        StateBuilder::new(substance)
    }
}

impl<B: EosBackend> State<B> {
    /// Builder for a state over any backend.
    pub fn builder_for(substance: &str) -> StateBuilder<B> {
        StateBuilder::new(substance)
    }

    pub fn substance(&self) -> Substance {
        self.substance
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set the label from anything displayable.
    pub fn set_label(&mut self, label: impl fmt::Display) -> StateResult<()> {
        self.label = Some(stringify(&label)?);
        Ok(())
    }

    pub fn clear_label(&mut self) {
        self.label = None;
    }

    pub fn units(&self) -> Option<UnitProfile> {
        self.units
    }

    /// Change the display profile. Values are re-expressed, not recomputed;
    /// switching to raw keeps the units currently shown.
    pub fn set_units(&mut self, units: Option<UnitProfile>) {
        trace!(substance = %self.substance, ?units, "re-expressing state");
        self.units = units;
        self.display.apply(units);
    }

    pub fn set_units_tag(&mut self, tag: &str) -> StateResult<()> {
        self.set_units(UnitProfile::parse_optional(tag)?);
        Ok(())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn is_resolved(&self) -> bool {
        self.properties.is_some()
    }

    /// Snapshot of the resolved properties.
    pub fn properties(&self) -> StateResult<&Properties> {
        self.properties.as_ref().ok_or(StateError::Unresolved)
    }

    /// Assign a pair by name, e.g. `"Tp"` or `"pT"`.
    pub fn set_pair(
        &mut self,
        name: &str,
        first: impl Into<Quantity>,
        second: impl Into<Quantity>,
    ) -> StateResult<()> {
        let pair = PropertyPair::parse(name)?;
        self.set(pair, first.into(), second.into())
    }

    /// Resolve the state from a pair of inputs.
    ///
    /// The backend is updated exactly once. On any error the state keeps
    /// its previous properties.
    pub fn set(&mut self, pair: PropertyPair, first: Quantity, second: Quantity) -> StateResult<()> {
        match self.backend.registry().classify_pair(pair) {
            PairClass::Allowed(_) => {}
            PairClass::Unsupported(_) => {
                debug!(substance = %self.substance, %pair, "unsupported pair");
                return Err(StateError::UnsupportedPair {
                    pair: pair.to_string(),
                });
            }
            PairClass::Invalid => {
                return Err(StateError::UnknownProperty {
                    name: pair.to_string(),
                });
            }
        }

        let (a, b) = validate::validate(pair, &first, &second)?;

        let unknown = || StateError::UnknownProperty {
            name: pair.to_string(),
        };
        let in_a = BackendInput::from_property(pair.first()).ok_or_else(unknown)?;
        let in_b = BackendInput::from_property(pair.second()).ok_or_else(unknown)?;
        let (selector, swapped) = InputSelector::for_inputs(in_a, in_b).ok_or_else(unknown)?;
        let (a, b) = (in_a.value_from_si(a), in_b.value_from_si(b));
        let (v1, v2) = if swapped { (b, a) } else { (a, b) };

        debug!(
            substance = %self.substance,
            backend = self.backend.name(),
            %pair,
            selector = %selector.name(),
            v1,
            v2,
            "updating backend"
        );
        if let Err(err) = self.backend.update(selector, v1, v2) {
            debug!(substance = %self.substance, %pair, error = %err, "backend rejected inputs");
            return Err(if err.is_saturation_conflict() {
                StateError::NotIndependent {
                    first: pair.first().symbol(),
                    second: pair.second().symbol(),
                }
            } else {
                err.into()
            });
        }

        let properties = Properties::read(&self.backend)?;
        self.properties = Some(properties);
        self.display = DisplayUnits::for_profile(self.units);
        Ok(())
    }

    /// Value of one property in its display unit. `None` only for quality
    /// of a single-phase state.
    pub fn get(&self, property: Property) -> StateResult<Option<Quantity>> {
        let properties = self.properties()?;
        Ok(properties
            .si(property)
            .map(|si| Quantity::from_si(si, self.display.get(property))))
    }

    fn get_defined(&self, property: Property) -> StateResult<Quantity> {
        self.get(property)?.ok_or(StateError::Unresolved)
    }

    pub fn t(&self) -> StateResult<Quantity> {
        self.get_defined(Property::T)
    }

    pub fn p(&self) -> StateResult<Quantity> {
        self.get_defined(Property::P)
    }

    pub fn v(&self) -> StateResult<Quantity> {
        self.get_defined(Property::V)
    }

    pub fn u(&self) -> StateResult<Quantity> {
        self.get_defined(Property::U)
    }

    pub fn h(&self) -> StateResult<Quantity> {
        self.get_defined(Property::H)
    }

    pub fn s(&self) -> StateResult<Quantity> {
        self.get_defined(Property::S)
    }

    pub fn x(&self) -> StateResult<Option<Quantity>> {
        self.get(Property::X)
    }

    pub fn cp(&self) -> StateResult<Quantity> {
        self.get_defined(Property::Cp)
    }

    pub fn cv(&self) -> StateResult<Quantity> {
        self.get_defined(Property::Cv)
    }

    pub fn phase(&self) -> StateResult<Phase> {
        Ok(self.properties()?.phase)
    }

    /// Read a pair by name, in the order the name gives.
    ///
    /// Unsupported pairs may be read back even though they cannot be assigned.
    pub fn pair(&self, name: &str) -> StateResult<(Option<Quantity>, Option<Quantity>)> {
        let unknown = || StateError::UnknownProperty {
            name: name.to_string(),
        };
        let pair = PropertyPair::parse(name).map_err(|_| unknown())?;
        if let PairClass::Invalid = self.backend.registry().classify_pair(pair) {
            return Err(unknown());
        }
        Ok((self.get(pair.first())?, self.get(pair.second())?))
    }
}

impl<B: EosBackend> PartialEq for State<B> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.properties, &other.properties) {
            (Some(a), Some(b)) => {
                self.substance == other.substance
                    && nearly_equal(a.t, b.t, Tolerances::STATE)
                    && nearly_equal(a.v, b.v, Tolerances::STATE)
            }
            _ => false,
        }
    }
}

impl<B: EosBackend> fmt::Debug for State<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("substance", &self.substance)
            .field("label", &self.label)
            .field("units", &self.units)
            .field("properties", &self.properties)
            .finish()
    }
}

impl<B: EosBackend> fmt::Display for State<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => writeln!(f, "{} ({})", self.substance, label)?,
            None => writeln!(f, "{}", self.substance)?,
        }
        let Some(properties) = &self.properties else {
            return write!(f, "  <unresolved>");
        };
        for property in Property::ALL {
            match properties.si(property) {
                Some(si) => writeln!(
                    f,
                    "  {:<5} = {}",
                    property.symbol(),
                    Quantity::from_si(si, self.display.get(property))
                )?,
                None => writeln!(f, "  {:<5} = None", property.symbol())?,
            }
        }
        write!(f, "  {:<5} = {}", "phase", properties.phase)
    }
}

/// Builds a [`State`], optionally resolving it from exactly two properties.
#[derive(Debug)]
pub struct StateBuilder<B: EosBackend = CoolProp> {
    substance: String,
    label: Option<StateResult<String>>,
    units: Option<Option<UnitProfile>>,
    inputs: Vec<(Property, Quantity)>,
    backend: PhantomData<B>,
}

impl<B: EosBackend> StateBuilder<B> {
    pub fn new(substance: &str) -> Self {
        Self {
            substance: substance.to_string(),
            label: None,
            units: None,
            inputs: Vec::new(),
            backend: PhantomData,
        }
    }

    pub fn label(mut self, label: impl fmt::Display) -> Self {
        self.label = Some(stringify(&label));
        self
    }

    /// Explicit profile; `None` is raw. Without this the process default applies.
    pub fn units(mut self, units: Option<UnitProfile>) -> Self {
        self.units = Some(units);
        self
    }

    /// Add an input property.
    pub fn with(mut self, property: Property, value: impl Into<Quantity>) -> Self {
        self.inputs.push((property, value.into()));
        self
    }

    pub fn build(self) -> StateResult<State<B>> {
        let substance: Substance = self.substance.parse()?;
        let label = self.label.transpose()?;
        let units = self.units.unwrap_or_else(default_units);

        let pair = match self.inputs.as_slice() {
            [] => None,
            [(p1, q1), (p2, q2)] => {
                let pair = PropertyPair::new(*p1, *p2).ok_or_else(|| {
                    StateError::UnknownProperty {
                        name: format!("{p1}{p2}"),
                    }
                })?;
                Some((pair, *q1, *q2))
            }
            other => return Err(StateError::InvalidArity { count: other.len() }),
        };

        let backend = B::open(substance)?;
        let mut state = State {
            substance,
            label,
            units,
            display: DisplayUnits::for_profile(units),
            properties: None,
            backend,
        };
        if let Some((pair, first, second)) = pair {
            state.set(pair, first, second)?;
        }
        Ok(state)
    }
}
