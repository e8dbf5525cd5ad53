// mt-core/src/units.rs
//
// Cost correlations are written in US customary units (deg F, BTU, lbmol) while
// equilibrium data usually carries Kelvin. Temperatures cross that boundary
// through uom so the conversion lives in one place.

use uom::si::f64::ThermodynamicTemperature as UomThermodynamicTemperature;

pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degf(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    Temperature::new::<degree_fahrenheit>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn to_kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

#[inline]
pub fn to_fahrenheit(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_fahrenheit;
    t.get::<degree_fahrenheit>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kelvin_to_fahrenheit() {
        let boiling = k(373.15);
        assert!((to_fahrenheit(boiling) - 212.0).abs() < 1e-9);
        assert!((to_kelvin(degf(32.0)) - 273.15).abs() < 1e-9);
        assert!((to_fahrenheit(degc(100.0)) - 212.0).abs() < 1e-9);
    }
}
