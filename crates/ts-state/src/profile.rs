//! Display-unit profiles.
//!
//! A profile picks the unit each property is expressed in when read back
//! from a [`State`](crate::State). `None` (raw) keeps SI base units, or
//! whatever units the state already shows.

use crate::error::{StateError, StateResult};
use crate::property::Property;
use crate::units::Unit;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Named unit families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitProfile {
    /// degC, bar, m³/kg, kJ/kg, kJ/(kg·K)
    Si,
    /// degF, psi, ft³/lb, BTU/lb, BTU/(lb·degR)
    Ee,
}

impl UnitProfile {
    pub fn unit_for(self, property: Property) -> Unit {
        match (self, property) {
            (UnitProfile::Si, Property::T) => Unit::Celsius,
            (UnitProfile::Si, Property::P) => Unit::Bar,
            (UnitProfile::Si, Property::V) => Unit::CubicMeterPerKilogram,
            (UnitProfile::Si, Property::U | Property::H) => Unit::KilojoulePerKilogram,
            (UnitProfile::Si, Property::S | Property::Cp | Property::Cv) => {
                Unit::KilojoulePerKilogramKelvin
            }
            (UnitProfile::Ee, Property::T) => Unit::Fahrenheit,
            (UnitProfile::Ee, Property::P) => Unit::Psi,
            (UnitProfile::Ee, Property::V) => Unit::CubicFootPerPound,
            (UnitProfile::Ee, Property::U | Property::H) => Unit::BtuPerPound,
            (UnitProfile::Ee, Property::S | Property::Cp | Property::Cv) => {
                Unit::BtuPerPoundRankine
            }
            (_, Property::X) => Unit::Dimensionless,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            UnitProfile::Si => "SI",
            UnitProfile::Ee => "EE",
        }
    }

    /// Parse an optional tag: `"SI"`, `"EE"`, or `"None"`/empty for raw.
    pub fn parse_optional(tag: &str) -> StateResult<Option<UnitProfile>> {
        match tag.trim() {
            "" | "None" | "none" | "raw" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl fmt::Display for UnitProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for UnitProfile {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "SI" => Ok(UnitProfile::Si),
            "EE" => Ok(UnitProfile::Ee),
            other => Err(StateError::UnsupportedUnits {
                tag: other.to_string(),
            }),
        }
    }
}

/// Per-property display units of one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DisplayUnits([Unit; 9]);

impl DisplayUnits {
    pub(crate) fn for_profile(profile: Option<UnitProfile>) -> Self {
        Self(Property::ALL.map(|p| match profile {
            Some(profile) => profile.unit_for(p),
            None => p.si_unit(),
        }))
    }

    pub(crate) fn get(&self, property: Property) -> Unit {
        self.0[property as usize]
    }

    /// Switch to a profile. Raw leaves the current units in place.
    pub(crate) fn apply(&mut self, profile: Option<UnitProfile>) {
        if profile.is_some() {
            *self = Self::for_profile(profile);
        }
    }
}

const RAW: u8 = 0;
const SI: u8 = 1;
const EE: u8 = 2;

static DEFAULT_UNITS: AtomicU8 = AtomicU8::new(RAW);

/// Set the process-wide default profile for states built without an
/// explicit one. States that already exist keep their profile.
pub fn set_default_units(profile: Option<UnitProfile>) {
    let code = match profile {
        None => RAW,
        Some(UnitProfile::Si) => SI,
        Some(UnitProfile::Ee) => EE,
    };
    DEFAULT_UNITS.store(code, Ordering::Relaxed);
}

/// Same as [`set_default_units`], from a textual tag.
pub fn set_default_units_tag(tag: &str) -> StateResult<()> {
    set_default_units(UnitProfile::parse_optional(tag)?);
    Ok(())
}

/// Current process-wide default profile.
pub fn default_units() -> Option<UnitProfile> {
    match DEFAULT_UNITS.load(Ordering::Relaxed) {
        SI => Some(UnitProfile::Si),
        EE => Some(UnitProfile::Ee),
        _ => None,
    }
}
