//! Property alphabet and phase classification.

use crate::error::StateError;
use crate::units::{Dimension, Unit};
use std::fmt;

/// A thermodynamic property of a [`State`](crate::State).
///
/// The first seven are inputs; `Cp` and `Cv` are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Temperature
    T,
    /// Pressure
    P,
    /// Specific volume
    V,
    /// Specific internal energy
    U,
    /// Specific enthalpy
    H,
    /// Specific entropy
    S,
    /// Vapor quality
    X,
    /// Specific heat capacity at constant pressure
    Cp,
    /// Specific heat capacity at constant volume
    Cv,
}

impl Property {
    pub const INPUTS: [Property; 7] = [
        Property::T,
        Property::P,
        Property::V,
        Property::U,
        Property::H,
        Property::S,
        Property::X,
    ];

    pub const ALL: [Property; 9] = [
        Property::T,
        Property::P,
        Property::V,
        Property::U,
        Property::H,
        Property::S,
        Property::X,
        Property::Cp,
        Property::Cv,
    ];

    /// Symbol used in pair names and error messages (case-sensitive).
    pub fn symbol(self) -> &'static str {
        match self {
            Property::T => "T",
            Property::P => "p",
            Property::V => "v",
            Property::U => "u",
            Property::H => "h",
            Property::S => "s",
            Property::X => "x",
            Property::Cp => "cp",
            Property::Cv => "cv",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Property::T => "temperature",
            Property::P => "pressure",
            Property::V => "specific volume",
            Property::U => "specific internal energy",
            Property::H => "specific enthalpy",
            Property::S => "specific entropy",
            Property::X => "quality",
            Property::Cp => "specific heat capacity at constant pressure",
            Property::Cv => "specific heat capacity at constant volume",
        }
    }

    /// Input property for a single pair letter.
    pub fn from_letter(letter: char) -> Option<Property> {
        Self::INPUTS
            .into_iter()
            .find(|p| p.symbol().starts_with(letter))
    }

    pub fn is_input(self) -> bool {
        !matches!(self, Property::Cp | Property::Cv)
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Property::T => Dimension::Temperature,
            Property::P => Dimension::Pressure,
            Property::V => Dimension::SpecificVolume,
            Property::U | Property::H => Dimension::SpecificEnergy,
            Property::S | Property::Cp | Property::Cv => Dimension::SpecificEntropy,
            Property::X => Dimension::Dimensionless,
        }
    }

    /// Canonical storage unit.
    pub fn si_unit(self) -> Unit {
        Unit::si(self.dimension())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for Property {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.symbol() == s)
            .ok_or_else(|| StateError::UnknownProperty { name: s.to_string() })
    }
}

/// Phase of a resolved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    CriticalPoint,
    Gas,
    Liquid,
    NotImposed,
    Supercritical,
    SupercriticalGas,
    SupercriticalLiquid,
    TwoPhase,
    Unknown,
}

impl Phase {
    /// Map a CoolProp phase index. Unrecognised codes become `Unknown`.
    pub fn from_coolprop_code(code: i64) -> Phase {
        match code {
            0 => Phase::Liquid,
            1 => Phase::Supercritical,
            2 => Phase::SupercriticalGas,
            3 => Phase::SupercriticalLiquid,
            4 => Phase::CriticalPoint,
            5 => Phase::Gas,
            6 => Phase::TwoPhase,
            8 => Phase::NotImposed,
            _ => Phase::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::CriticalPoint => "critical_point",
            Phase::Gas => "gas",
            Phase::Liquid => "liquid",
            Phase::NotImposed => "not_imposed",
            Phase::Supercritical => "supercritical",
            Phase::SupercriticalGas => "supercritical_gas",
            Phase::SupercriticalLiquid => "supercritical_liquid",
            Phase::TwoPhase => "two_phase",
            Phase::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
