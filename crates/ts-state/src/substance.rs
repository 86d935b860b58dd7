//! Substance allow-list.

use crate::error::StateError;
use std::fmt;

/// Pure fluids a [`State`](crate::State) may be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Substance {
    /// Air (pseudo-pure backend fluid)
    Air,
    /// Ammonia (NH₃)
    Ammonia,
    /// Water (H₂O)
    Water,
    /// Propane
    Propane,
    /// Refrigerant R134a
    R134a,
    /// Refrigerant R22
    R22,
    /// Isobutane
    Isobutane,
    /// Carbon dioxide (CO₂)
    CarbonDioxide,
    /// Oxygen (O₂)
    Oxygen,
    /// Nitrogen (N₂)
    Nitrogen,
}

impl Substance {
    pub const ALL: [Substance; 10] = [
        Substance::Air,
        Substance::Ammonia,
        Substance::Water,
        Substance::Propane,
        Substance::R134a,
        Substance::R22,
        Substance::Isobutane,
        Substance::CarbonDioxide,
        Substance::Oxygen,
        Substance::Nitrogen,
    ];

    /// Canonical (uppercase) name.
    pub fn name(&self) -> &'static str {
        match self {
            Substance::Air => "AIR",
            Substance::Ammonia => "AMMONIA",
            Substance::Water => "WATER",
            Substance::Propane => "PROPANE",
            Substance::R134a => "R134A",
            Substance::R22 => "R22",
            Substance::Isobutane => "ISOBUTANE",
            Substance::CarbonDioxide => "CARBONDIOXIDE",
            Substance::Oxygen => "OXYGEN",
            Substance::Nitrogen => "NITROGEN",
        }
    }

    /// CoolProp fluid name for this substance.
    pub fn coolprop_name(&self) -> &'static str {
        match self {
            Substance::Air => "Air",
            Substance::Ammonia => "Ammonia",
            Substance::Water => "Water",
            Substance::Propane => "n-Propane",
            Substance::R134a => "R134a",
            Substance::R22 => "R22",
            Substance::Isobutane => "IsoButane",
            Substance::CarbonDioxide => "CarbonDioxide",
            Substance::Oxygen => "Oxygen",
            Substance::Nitrogen => "Nitrogen",
        }
    }

    /// Comma-separated list of canonical names, for error messages and help.
    pub fn allowed_names() -> String {
        Self::ALL
            .iter()
            .map(Substance::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Substance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Substance {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|substance| substance.name() == upper)
            .ok_or_else(|| StateError::UnknownSubstance {
                name: upper,
                allowed: Self::allowed_names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!("water".parse::<Substance>().unwrap(), Substance::Water);
        assert_eq!("Water".parse::<Substance>().unwrap(), Substance::Water);
        assert_eq!(" r134a ".parse::<Substance>().unwrap(), Substance::R134a);
        assert_eq!(
            "carbondioxide".parse::<Substance>().unwrap(),
            Substance::CarbonDioxide
        );
    }

    #[test]
    fn canonical_names_roundtrip() {
        for substance in Substance::ALL {
            assert_eq!(substance.name().parse::<Substance>().unwrap(), substance);
            assert_eq!(substance.to_string(), substance.name());
        }
    }

    #[test]
    fn unknown_substance_rejected() {
        let err = "mercury".parse::<Substance>().unwrap_err();
        match err {
            StateError::UnknownSubstance { name, allowed } => {
                assert_eq!(name, "MERCURY");
                assert!(allowed.contains("WATER"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn coolprop_names() {
        assert_eq!(Substance::Water.coolprop_name(), "Water");
        assert_eq!(Substance::Propane.coolprop_name(), "n-Propane");
        assert_eq!(Substance::Isobutane.coolprop_name(), "IsoButane");
    }
}
