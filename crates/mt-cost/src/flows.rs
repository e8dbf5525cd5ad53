//! Plant basis and the molar flows it implies.

use crate::constants::CostConstants;
use crate::error::{CostError, CostResult};
use mt_core::numeric::{ensure_fraction, ensure_positive};
use mt_core::units::{Temperature, degf};
use mt_vle::{ComponentProps, mixture_molecular_weight};

/// Plant-level data shared by every reflux ratio of a design case.
///
/// Component A is the light (more volatile) component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantBasis {
    pub light: ComponentProps,
    pub heavy: ComponentProps,
    /// Liquid molar heat capacity of A, BTU/(lbmol F)
    pub light_heat_capacity: f64,
    /// Liquid molar heat capacity of B, BTU/(lbmol F)
    pub heavy_heat_capacity: f64,
    /// Molar heat of vaporization, BTU/lbmol
    pub heat_of_vaporization: f64,
    pub feed_temperature: Temperature,
    /// Distillate production target, lbm/day
    pub distillate_mass_rate: f64,
    /// Used when the equilibrium curve carries no temperatures
    pub bottoms_temperature: Option<Temperature>,
}

impl PlantBasis {
    /// Ethanol (A) and water (B) at 48 000 lbm/day of distillate with a
    /// 140 F feed.
    pub fn ethanol_water() -> Self {
        Self {
            light: ComponentProps {
                molecular_weight: 46.07,
                density: 49.59,
            },
            heavy: ComponentProps {
                molecular_weight: 18.02,
                density: 62.16,
            },
            light_heat_capacity: 0.548 * 46.07,
            heavy_heat_capacity: 18.02,
            heat_of_vaporization: 17_000.0,
            feed_temperature: degf(140.0),
            distillate_mass_rate: 48_000.0,
            bottoms_temperature: None,
        }
    }

    /// Molar heat capacity of a liquid with mole fraction `x` of A.
    pub fn mixture_heat_capacity(&self, x: f64) -> f64 {
        x * self.light_heat_capacity + (1.0 - x) * self.heavy_heat_capacity
    }

    /// Distillate mass over the horizon in thousands of lbm; the divisor of
    /// per-unit costs.
    pub fn distillate_kilo_lb(&self, c: &CostConstants) -> f64 {
        self.distillate_mass_rate * c.operating_days_per_year * c.horizon_years / 1000.0
    }

    pub fn validate(&self) -> CostResult<()> {
        ensure_positive(self.light.molecular_weight, "molecular weight of A")?;
        ensure_positive(self.heavy.molecular_weight, "molecular weight of B")?;
        ensure_positive(self.light_heat_capacity, "heat capacity of A")?;
        ensure_positive(self.heavy_heat_capacity, "heat capacity of B")?;
        ensure_positive(self.heat_of_vaporization, "heat of vaporization")?;
        ensure_positive(self.distillate_mass_rate, "distillate mass rate")?;
        if !self.feed_temperature.value.is_finite() {
            return Err(CostError::NonFinite {
                what: "feed temperature",
                value: self.feed_temperature.value,
            });
        }
        Ok(())
    }
}

/// Distillate, bottoms and feed flows, lbmol/hr.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessFlows {
    pub distillate: f64,
    pub bottoms: f64,
    pub feed: f64,
}

impl ProcessFlows {
    /// Flows meeting the distillate production target, from the overall and
    /// light-component balances.
    pub fn from_production(basis: &PlantBasis, xf: f64, xd: f64, xb: f64) -> CostResult<Self> {
        basis.validate()?;
        let xf = ensure_fraction(xf, "xF")?;
        let xd = ensure_fraction(xd, "xD")?;
        let xb = ensure_fraction(xb, "xB")?;
        if !(xb < xf && xf < xd) {
            return Err(CostError::InvalidArg {
                what: format!("flows need xB < xF < xD, got xB={xb}, xF={xf}, xD={xd}"),
            });
        }

        let mw_d = mixture_molecular_weight(
            xd,
            basis.light.molecular_weight,
            basis.heavy.molecular_weight,
        );
        let distillate = basis.distillate_mass_rate / mw_d / 24.0;
        let bottoms = distillate * (xf - xd) / (xb - xf);
        Ok(Self {
            distillate,
            bottoms,
            feed: distillate + bottoms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_flows() {
        let flows = ProcessFlows::from_production(
            &PlantBasis::ethanol_water(),
            0.044504,
            0.855676706,
            0.0119526405,
        )
        .unwrap();
        assert!((flows.distillate - 47.59442135513851).abs() < 1e-9);
        assert!((flows.bottoms - 1186.0424926692199).abs() < 1e-7);
        assert!((flows.feed - 1233.6369140243585).abs() < 1e-7);
    }

    #[test]
    fn light_component_balances() {
        let (xf, xd, xb) = (0.3, 0.9, 0.02);
        let flows =
            ProcessFlows::from_production(&PlantBasis::ethanol_water(), xf, xd, xb).unwrap();
        let light_in = flows.feed * xf;
        let light_out = flows.distillate * xd + flows.bottoms * xb;
        assert!((light_in - light_out).abs() < 1e-9 * light_in);
    }

    #[test]
    fn inverted_compositions_are_rejected() {
        let err = ProcessFlows::from_production(&PlantBasis::ethanol_water(), 0.5, 0.1, 0.9)
            .unwrap_err();
        assert!(matches!(err, CostError::InvalidArg { .. }));
    }

    #[test]
    fn per_unit_divisor() {
        let basis = PlantBasis::ethanol_water();
        assert_eq!(basis.distillate_kilo_lb(&CostConstants::default()), 51_840.0);
    }
}
