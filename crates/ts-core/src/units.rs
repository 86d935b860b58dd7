// ts-core/src/units.rs

use uom::si::f64::{
    AvailableEnergy as UomAvailableEnergy, MassDensity as UomMassDensity,
    Pressure as UomPressure, Ratio as UomRatio,
    SpecificHeatCapacity as UomSpecificHeatCapacity, SpecificVolume as UomSpecificVolume,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type SpecEnergy = UomAvailableEnergy;
pub type SpecEntropy = UomSpecificHeatCapacity;
pub type SpecHeatCapacity = UomSpecificHeatCapacity;
pub type SpecVolume = UomSpecificVolume;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn m3_per_kg(v: f64) -> SpecVolume {
    use uom::si::specific_volume::cubic_meter_per_kilogram;
    SpecVolume::new::<cubic_meter_per_kilogram>(v)
}

#[inline]
pub fn j_per_kg(v: f64) -> SpecEnergy {
    use uom::si::available_energy::joule_per_kilogram;
    SpecEnergy::new::<joule_per_kilogram>(v)
}

#[inline]
pub fn j_per_kg_k(v: f64) -> SpecEntropy {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    SpecEntropy::new::<joule_per_kilogram_kelvin>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

#[inline]
pub fn percent(v: f64) -> Ratio {
    use uom::si::ratio::percent;
    Ratio::new::<percent>(v)
}

/// Offset temperature scales. Conversions go through uom so the affine
/// offsets live in one place.
pub mod temperature {
    use super::Temperature;
    use uom::si::thermodynamic_temperature::{
        degree_celsius, degree_fahrenheit, degree_rankine, kelvin,
    };

    #[inline]
    pub fn from_celsius(v: f64) -> Temperature {
        Temperature::new::<degree_celsius>(v)
    }

    #[inline]
    pub fn from_fahrenheit(v: f64) -> Temperature {
        Temperature::new::<degree_fahrenheit>(v)
    }

    #[inline]
    pub fn from_rankine(v: f64) -> Temperature {
        Temperature::new::<degree_rankine>(v)
    }

    #[inline]
    pub fn kelvin_of(t: Temperature) -> f64 {
        t.get::<kelvin>()
    }

    #[inline]
    pub fn celsius_of(t: Temperature) -> f64 {
        t.get::<degree_celsius>()
    }

    #[inline]
    pub fn fahrenheit_of(t: Temperature) -> f64 {
        t.get::<degree_fahrenheit>()
    }

    #[inline]
    pub fn rankine_of(t: Temperature) -> f64 {
        t.get::<degree_rankine>()
    }
}

pub mod constants {
    /// Standard atmosphere [Pa].
    pub const ATM_PA: f64 = 101_325.0;
    /// Pound-force per square inch [Pa].
    pub const PSI_PA: f64 = 6_894.757_293_168_361;
    /// International-table BTU per pound-mass [J/kg].
    pub const BTU_PER_LB_J_PER_KG: f64 = 2_326.0;
    /// International-table BTU per pound-mass per degree Rankine [J/(kg·K)].
    pub const BTU_PER_LB_R_J_PER_KG_K: f64 = 4_186.8;
    /// Cubic foot per pound-mass [m³/kg].
    pub const FT3_PER_LB_M3_PER_KG: f64 = 0.028_316_846_592 / 0.453_592_37;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _rho = kg_per_m3(1.2);
        let _v = m3_per_kg(0.8);
        let _u = j_per_kg(2.5e6);
        let _s = j_per_kg_k(7496.2);
        let _r = unitless(0.5);
    }

    #[test]
    fn percent_is_hundredth_of_ratio() {
        assert!((percent(50.0).value - 0.5).abs() < 1e-15);
        assert!((unitless(0.5).value - percent(50.0).value).abs() < 1e-15);
    }

    #[test]
    fn offset_scales_round_trip() {
        let t = temperature::from_celsius(100.0);
        assert!((temperature::kelvin_of(t) - 373.15).abs() < 1e-9);
        assert!((temperature::fahrenheit_of(t) - 212.0).abs() < 1e-9);
        assert!((temperature::rankine_of(t) - 671.67).abs() < 1e-9);

        let f = temperature::from_fahrenheit(32.0);
        assert!((temperature::celsius_of(f)).abs() < 1e-9);
    }

    #[test]
    fn imperial_constants_are_consistent() {
        // 1 ft³/lb ≈ 0.0624 m³/kg
        assert!((constants::FT3_PER_LB_M3_PER_KG - 0.062_427_960_576).abs() < 1e-9);
        // BTU/(lb·R) is BTU/lb scaled by 9/5
        let ratio = constants::BTU_PER_LB_R_J_PER_KG_K / constants::BTU_PER_LB_J_PER_KG;
        assert!((ratio - 1.8).abs() < 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn percent_scales_by_one_hundredth(v in -1e6f64..1e6) {
                prop_assert!((percent(v).value - unitless(v / 100.0).value).abs() <= 1e-12 * v.abs().max(1.0));
            }

            #[test]
            fn celsius_round_trips_through_kelvin(c in -200.0f64..2000.0) {
                let t = temperature::from_celsius(c);
                prop_assert!((temperature::celsius_of(t) - c).abs() < 1e-9);
                prop_assert!((temperature::kelvin_of(t) - (c + 273.15)).abs() < 1e-9);
            }
        }
    }
}
