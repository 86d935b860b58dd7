//! Dimensioned quantities.
//!
//! A [`Quantity`] is a magnitude tagged with the [`Unit`] it is expressed in.
//! Each unit knows its physical [`Dimension`] and how to reach the canonical
//! SI unit of that dimension, so dimension checks happen at runtime on values
//! supplied by callers (text or typed).
//!
//! Temperature conversions are affine and go through `ts_core::units::temperature`.

use std::fmt;
use thiserror::Error;
use ts_core::units::{constants, temperature};
use ts_core::{
    Pressure, Ratio, SpecEnergy, SpecEntropy, SpecVolume, Temperature, j_per_kg, j_per_kg_k,
    m3_per_kg, pa, unitless,
};

/// Physical dimension of a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Temperature,
    Pressure,
    SpecificVolume,
    SpecificEnergy,
    /// Specific entropy and specific heat capacity share this dimension.
    SpecificEntropy,
    Dimensionless,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Temperature => "[temperature]",
            Self::Pressure => "[mass] / [length] / [time] ** 2",
            Self::SpecificVolume => "[length] ** 3 / [mass]",
            Self::SpecificEnergy => "[length] ** 2 / [time] ** 2",
            Self::SpecificEntropy => "[length] ** 2 / [temperature] / [time] ** 2",
            Self::Dimensionless => "dimensionless",
        };
        f.write_str(text)
    }
}

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Unit not recognized
    #[error("Unknown unit '{unit}'")]
    UnknownUnit { unit: String },
    /// Conversion between units of different dimensions
    #[error("Cannot convert from '{from}' ({from_dim}) to '{to}' ({to_dim})")]
    Incompatible {
        from: Unit,
        from_dim: Dimension,
        to: Unit,
        to_dim: Dimension,
    },
}

/// Units understood by the quantity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    Kelvin,
    Celsius,
    Fahrenheit,
    Rankine,
    Pascal,
    Kilopascal,
    Megapascal,
    Bar,
    Atmosphere,
    Psi,
    CubicMeterPerKilogram,
    LiterPerKilogram,
    CubicFootPerPound,
    JoulePerKilogram,
    KilojoulePerKilogram,
    BtuPerPound,
    JoulePerKilogramKelvin,
    KilojoulePerKilogramKelvin,
    BtuPerPoundRankine,
    Dimensionless,
    /// Dimensionless, scaled by 1/100.
    Percent,
}

impl Unit {
    pub fn dimension(self) -> Dimension {
        match self {
            Self::Kelvin | Self::Celsius | Self::Fahrenheit | Self::Rankine => {
                Dimension::Temperature
            }
            Self::Pascal
            | Self::Kilopascal
            | Self::Megapascal
            | Self::Bar
            | Self::Atmosphere
            | Self::Psi => Dimension::Pressure,
            Self::CubicMeterPerKilogram | Self::LiterPerKilogram | Self::CubicFootPerPound => {
                Dimension::SpecificVolume
            }
            Self::JoulePerKilogram | Self::KilojoulePerKilogram | Self::BtuPerPound => {
                Dimension::SpecificEnergy
            }
            Self::JoulePerKilogramKelvin
            | Self::KilojoulePerKilogramKelvin
            | Self::BtuPerPoundRankine => Dimension::SpecificEntropy,
            Self::Dimensionless | Self::Percent => Dimension::Dimensionless,
        }
    }

    /// Canonical SI unit for a dimension.
    pub fn si(dimension: Dimension) -> Unit {
        match dimension {
            Dimension::Temperature => Self::Kelvin,
            Dimension::Pressure => Self::Pascal,
            Dimension::SpecificVolume => Self::CubicMeterPerKilogram,
            Dimension::SpecificEnergy => Self::JoulePerKilogram,
            Dimension::SpecificEntropy => Self::JoulePerKilogramKelvin,
            Dimension::Dimensionless => Self::Dimensionless,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kelvin => "K",
            Self::Celsius => "degC",
            Self::Fahrenheit => "degF",
            Self::Rankine => "degR",
            Self::Pascal => "Pa",
            Self::Kilopascal => "kPa",
            Self::Megapascal => "MPa",
            Self::Bar => "bar",
            Self::Atmosphere => "atm",
            Self::Psi => "psi",
            Self::CubicMeterPerKilogram => "m^3/kg",
            Self::LiterPerKilogram => "L/kg",
            Self::CubicFootPerPound => "ft^3/lb",
            Self::JoulePerKilogram => "J/kg",
            Self::KilojoulePerKilogram => "kJ/kg",
            Self::BtuPerPound => "BTU/lb",
            Self::JoulePerKilogramKelvin => "J/(kg*K)",
            Self::KilojoulePerKilogramKelvin => "kJ/(kg*K)",
            Self::BtuPerPoundRankine => "BTU/(lb*degR)",
            Self::Dimensionless => "dimensionless",
            Self::Percent => "%",
        }
    }

    /// True for units whose zero is not the absolute zero of the dimension.
    pub fn is_offset(self) -> bool {
        matches!(self, Self::Celsius | Self::Fahrenheit)
    }

    /// Multiplier to the SI unit for non-offset units.
    fn scale(self) -> f64 {
        match self {
            Self::Kelvin => 1.0,
            Self::Rankine => 5.0 / 9.0,
            // offset units never reach here
            Self::Celsius | Self::Fahrenheit => 1.0,
            Self::Pascal => 1.0,
            Self::Kilopascal => 1e3,
            Self::Megapascal => 1e6,
            Self::Bar => 1e5,
            Self::Atmosphere => constants::ATM_PA,
            Self::Psi => constants::PSI_PA,
            Self::CubicMeterPerKilogram => 1.0,
            Self::LiterPerKilogram => 1e-3,
            Self::CubicFootPerPound => constants::FT3_PER_LB_M3_PER_KG,
            Self::JoulePerKilogram => 1.0,
            Self::KilojoulePerKilogram => 1e3,
            Self::BtuPerPound => constants::BTU_PER_LB_J_PER_KG,
            Self::JoulePerKilogramKelvin => 1.0,
            Self::KilojoulePerKilogramKelvin => 1e3,
            Self::BtuPerPoundRankine => constants::BTU_PER_LB_R_J_PER_KG_K,
            Self::Dimensionless => 1.0,
            Self::Percent => 1e-2,
        }
    }

    /// Convert a magnitude in this unit to the SI unit of its dimension.
    pub fn to_si(self, value: f64) -> f64 {
        match self {
            Self::Celsius => temperature::kelvin_of(temperature::from_celsius(value)),
            Self::Fahrenheit => temperature::kelvin_of(temperature::from_fahrenheit(value)),
            _ => value * self.scale(),
        }
    }

    /// Convert an SI magnitude into this unit.
    pub fn from_si(self, si: f64) -> f64 {
        match self {
            Self::Celsius => temperature::celsius_of(ts_core::k(si)),
            Self::Fahrenheit => temperature::fahrenheit_of(ts_core::k(si)),
            _ => si / self.scale(),
        }
    }

    /// Look up a unit by its textual symbol.
    ///
    /// SI-prefixed symbols are case-sensitive (`mPa` is not `MPa`); every
    /// other name matches regardless of case.
    pub fn from_symbol(symbol: &str) -> Result<Unit, UnitError> {
        let symbol = symbol.trim();
        let prefixed = match symbol {
            "kPa" => Some(Self::Kilopascal),
            "MPa" => Some(Self::Megapascal),
            "kJ/kg" => Some(Self::KilojoulePerKilogram),
            "kJ/(kg*K)" | "kJ/(kg·K)" | "kJ/(kg K)" | "kJ/kg/K" => {
                Some(Self::KilojoulePerKilogramKelvin)
            }
            _ => None,
        };
        if let Some(unit) = prefixed {
            return Ok(unit);
        }
        let unit = match symbol.to_lowercase().as_str() {
            "k" | "kelvin" => Self::Kelvin,
            "degc" | "°c" | "c" | "celsius" => Self::Celsius,
            "degf" | "°f" | "f" | "fahrenheit" => Self::Fahrenheit,
            "degr" | "°r" | "r" | "rankine" => Self::Rankine,
            "pa" | "pascal" => Self::Pascal,
            "bar" => Self::Bar,
            "atm" => Self::Atmosphere,
            "psi" | "psia" => Self::Psi,
            "m^3/kg" | "m³/kg" | "m3/kg" | "m**3/kg" => Self::CubicMeterPerKilogram,
            "l/kg" => Self::LiterPerKilogram,
            "ft^3/lb" | "ft³/lb" | "ft3/lb" | "ft**3/lb" | "ft^3/lbm" | "ft3/lbm" => {
                Self::CubicFootPerPound
            }
            "j/kg" => Self::JoulePerKilogram,
            "btu/lb" | "btu/lbm" => Self::BtuPerPound,
            "j/(kg*k)" | "j/(kg·k)" | "j/(kg k)" | "j/kg/k" => Self::JoulePerKilogramKelvin,
            "btu/(lb*degr)" | "btu/(lb*r)" | "btu/(lbm*r)" | "btu/(lbm·r)" | "btu/(lbm r)" => {
                Self::BtuPerPoundRankine
            }
            "" | "dimensionless" => Self::Dimensionless,
            "%" | "percent" | "pct" => Self::Percent,
            _ => {
                return Err(UnitError::UnknownUnit {
                    unit: symbol.to_string(),
                });
            }
        };
        Ok(unit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Unit::from_symbol(s)
    }
}

/// A magnitude with a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Build a quantity from an SI magnitude, expressed in `unit`.
    pub fn from_si(si: f64, unit: Unit) -> Self {
        Self {
            value: unit.from_si(si),
            unit,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Magnitude in the SI unit of this quantity's dimension.
    pub fn si_value(&self) -> f64 {
        self.unit.to_si(self.value)
    }

    /// Re-express in another unit of the same dimension.
    pub fn to(&self, unit: Unit) -> Result<Quantity, UnitError> {
        if unit.dimension() != self.dimension() {
            return Err(UnitError::Incompatible {
                from: self.unit,
                from_dim: self.dimension(),
                to: unit,
                to_dim: unit.dimension(),
            });
        }
        Ok(Quantity::from_si(self.si_value(), unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Dimensionless => write!(f, "{}", self.value),
            Unit::Percent => write!(f, "{}%", self.value),
            unit => write!(f, "{} {}", self.value, unit),
        }
    }
}

impl std::str::FromStr for Quantity {
    type Err = UnitError;

    /// Parse `"<number> <unit>"`, e.g. `"400 K"`, `"1 atm"`, `"50%"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, unit) = split_value_and_unit(s)?;
        Ok(Quantity::new(value, Unit::from_symbol(&unit)?))
    }
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "70degF" -> (70.0, "degF")
/// - "14.7 psi" -> (14.7, "psi")
/// - "0.5" -> (0.5, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    // Find where the numeric part ends
    let split_idx = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+' && c != 'e' && c != 'E')
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);

    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.trim().to_string()))
}

macro_rules! uom_interop {
    ($ty:ty, $dim:expr, $get:expr, $make:expr) => {
        impl From<$ty> for Quantity {
            fn from(q: $ty) -> Self {
                Quantity::new($get(q), Unit::si($dim))
            }
        }

        impl TryFrom<Quantity> for $ty {
            type Error = UnitError;

            fn try_from(q: Quantity) -> Result<Self, Self::Error> {
                let si = q.to(Unit::si($dim))?;
                Ok($make(si.value()))
            }
        }
    };
}

uom_interop!(
    Temperature,
    Dimension::Temperature,
    temperature::kelvin_of,
    ts_core::k
);
uom_interop!(
    Pressure,
    Dimension::Pressure,
    |p: Pressure| p.get::<uom::si::pressure::pascal>(),
    pa
);
uom_interop!(
    SpecVolume,
    Dimension::SpecificVolume,
    |v: SpecVolume| v.get::<uom::si::specific_volume::cubic_meter_per_kilogram>(),
    m3_per_kg
);
uom_interop!(
    SpecEnergy,
    Dimension::SpecificEnergy,
    |e: SpecEnergy| e.get::<uom::si::available_energy::joule_per_kilogram>(),
    j_per_kg
);
uom_interop!(
    SpecEntropy,
    Dimension::SpecificEntropy,
    |s: SpecEntropy| s.get::<uom::si::specific_heat_capacity::joule_per_kilogram_kelvin>(),
    j_per_kg_k
);
uom_interop!(
    Ratio,
    Dimension::Dimensionless,
    |r: Ratio| r.get::<uom::si::ratio::ratio>(),
    unitless
);

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn parse_temperature_units() {
        let q: Quantity = "300 K".parse().unwrap();
        assert_eq!(q.si_value(), 300.0);
        let q: Quantity = "0 degC".parse().unwrap();
        assert!(close(q.si_value(), 273.15));
        let q: Quantity = "32degF".parse().unwrap();
        assert!(close(q.si_value(), 273.15));
        let q: Quantity = "491.67 degR".parse().unwrap();
        assert!(close(q.si_value(), 273.15));
    }

    #[test]
    fn parse_pressure_units() {
        let q: Quantity = "101325 Pa".parse().unwrap();
        assert_eq!(q.si_value(), 101325.0);
        let q: Quantity = "1 bar".parse().unwrap();
        assert_eq!(q.si_value(), 1e5);
        let q: Quantity = "1 atm".parse().unwrap();
        assert_eq!(q.si_value(), 101325.0);
        let q: Quantity = "14.7 psi".parse().unwrap();
        assert!(close(q.si_value(), 14.7 * 6894.757293168361));
    }

    #[test]
    fn prefixes_are_case_sensitive() {
        let q: Quantity = "5 MPa".parse().unwrap();
        assert_eq!(q.si_value(), 5e6);
        let q: Quantity = "5 kPa".parse().unwrap();
        assert_eq!(q.si_value(), 5e3);
        for text in ["5 mPa", "5 mpa", "5 MPA", "5 KPa", "1 kj/kg", "1 KJ/(kg*K)"] {
            assert!(
                matches!(text.parse::<Quantity>(), Err(UnitError::UnknownUnit { .. })),
                "{text} should not parse"
            );
        }
        let q: Quantity = "1 ATM".parse().unwrap();
        assert_eq!(q.unit(), Unit::Atmosphere);
        let q: Quantity = "300 kelvin".parse().unwrap();
        assert_eq!(q.unit(), Unit::Kelvin);
    }

    #[test]
    fn parse_specific_units() {
        let q: Quantity = "1.8 m^3/kg".parse().unwrap();
        assert_eq!(q.unit(), Unit::CubicMeterPerKilogram);
        let q: Quantity = "2500 kJ/kg".parse().unwrap();
        assert_eq!(q.si_value(), 2.5e6);
        let q: Quantity = "1 BTU/lb".parse().unwrap();
        assert_eq!(q.si_value(), 2326.0);
        let q: Quantity = "1 BTU/(lb*degR)".parse().unwrap();
        assert_eq!(q.si_value(), 4186.8);
    }

    #[test]
    fn percent_is_scaled_dimensionless() {
        let pct: Quantity = "50 %".parse().unwrap();
        let plain: Quantity = "0.5".parse().unwrap();
        assert_eq!(pct.dimension(), Dimension::Dimensionless);
        assert_eq!(plain.unit(), Unit::Dimensionless);
        assert_eq!(pct.si_value(), plain.si_value());
    }

    #[test]
    fn reject_garbage() {
        assert!(matches!(
            "abc K".parse::<Quantity>(),
            Err(UnitError::ParseError(_))
        ));
        assert!(matches!(
            "3 furlongs".parse::<Quantity>(),
            Err(UnitError::UnknownUnit { unit }) if unit == "furlongs"
        ));
    }

    #[test]
    fn offset_conversion() {
        let q = Quantity::new(100.0, Unit::Celsius);
        let f = q.to(Unit::Fahrenheit).unwrap();
        assert!(close(f.value(), 212.0));
        let k = f.to(Unit::Kelvin).unwrap();
        assert!(close(k.value(), 373.15));
        assert!(Unit::Celsius.is_offset());
        assert!(!Unit::Rankine.is_offset());
    }

    #[test]
    fn incompatible_conversion() {
        let q = Quantity::new(1.0, Unit::Bar);
        assert!(matches!(
            q.to(Unit::Kelvin),
            Err(UnitError::Incompatible { .. })
        ));
    }

    #[test]
    fn uom_interop() {
        let q: Quantity = ts_core::k(400.0).into();
        assert_eq!(q, Quantity::new(400.0, Unit::Kelvin));

        let p = Pressure::try_from(Quantity::new(1.0, Unit::Bar)).unwrap();
        assert_eq!(p.get::<uom::si::pressure::pascal>(), 1e5);

        let t = Temperature::try_from(Quantity::new(0.0, Unit::Celsius)).unwrap();
        assert!(close(temperature::kelvin_of(t), 273.15));

        assert!(Pressure::try_from(Quantity::new(1.0, Unit::Kelvin)).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Quantity::new(400.0, Unit::Kelvin).to_string(), "400 K");
        assert_eq!(Quantity::new(0.5, Unit::Dimensionless).to_string(), "0.5");
        assert_eq!(Quantity::new(50.0, Unit::Percent).to_string(), "50%");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const UNITS: [Unit; 21] = [
            Unit::Kelvin,
            Unit::Celsius,
            Unit::Fahrenheit,
            Unit::Rankine,
            Unit::Pascal,
            Unit::Kilopascal,
            Unit::Megapascal,
            Unit::Bar,
            Unit::Atmosphere,
            Unit::Psi,
            Unit::CubicMeterPerKilogram,
            Unit::LiterPerKilogram,
            Unit::CubicFootPerPound,
            Unit::JoulePerKilogram,
            Unit::KilojoulePerKilogram,
            Unit::BtuPerPound,
            Unit::JoulePerKilogramKelvin,
            Unit::KilojoulePerKilogramKelvin,
            Unit::BtuPerPoundRankine,
            Unit::Dimensionless,
            Unit::Percent,
        ];

        proptest! {
            #[test]
            fn si_roundtrip(idx in 0usize..UNITS.len(), value in -1.0e6f64..1.0e6) {
                let unit = UNITS[idx];
                let back = unit.from_si(unit.to_si(value));
                prop_assert!((back - value).abs() <= 1e-9 * value.abs().max(1.0));
            }

            #[test]
            fn symbols_parse_back(idx in 0usize..UNITS.len()) {
                let unit = UNITS[idx];
                prop_assert_eq!(Unit::from_symbol(unit.symbol()).unwrap(), unit);
            }
        }
    }
}
