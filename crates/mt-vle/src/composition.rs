//! Binary composition basis conversions.
//!
//! Specifications often quote the light component (A) as a volume or mass
//! fraction; the McCabe-Thiele construction works in mole fractions.

use crate::error::VleResult;
use mt_core::numeric::{ensure_fraction, ensure_positive};

/// Pure-component properties needed for basis conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentProps {
    /// Molecular weight, lbm/lbmol
    pub molecular_weight: f64,
    /// Liquid density, lbm/ft^3
    pub density: f64,
}

/// Mole fraction of A from its liquid volume fraction.
pub fn volume_to_mole_fraction(
    volume_fraction: f64,
    a: ComponentProps,
    b: ComponentProps,
) -> VleResult<f64> {
    let vol_a = ensure_fraction(volume_fraction, "volume fraction")?;
    let rho_a = ensure_positive(a.density, "density of A")?;
    let rho_b = ensure_positive(b.density, "density of B")?;
    let mw_a = ensure_positive(a.molecular_weight, "molecular weight of A")?;
    let mw_b = ensure_positive(b.molecular_weight, "molecular weight of B")?;

    let mol_a = vol_a * rho_a / mw_a;
    let mol_b = (1.0 - vol_a) * rho_b / mw_b;
    Ok(mol_a / (mol_a + mol_b))
}

/// Mole fraction of A from its mass fraction.
pub fn mass_to_mole_fraction(mass_fraction: f64, mw_a: f64, mw_b: f64) -> VleResult<f64> {
    let mass_a = ensure_fraction(mass_fraction, "mass fraction")?;
    let mw_a = ensure_positive(mw_a, "molecular weight of A")?;
    let mw_b = ensure_positive(mw_b, "molecular weight of B")?;

    let mol_a = mass_a / mw_a;
    let mol_b = (1.0 - mass_a) / mw_b;
    Ok(mol_a / (mol_a + mol_b))
}

/// Average molecular weight of a binary mixture at mole fraction `x` of A.
pub fn mixture_molecular_weight(x: f64, mw_a: f64, mw_b: f64) -> f64 {
    x * mw_a + (1.0 - x) * mw_b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VleError;

    const ETHANOL: ComponentProps = ComponentProps {
        molecular_weight: 46.07,
        density: 49.59,
    };
    const WATER: ComponentProps = ComponentProps {
        molecular_weight: 18.02,
        density: 62.16,
    };

    #[test]
    fn ethanol_distillate_volume_basis() {
        // 95 vol% ethanol
        let x = volume_to_mole_fraction(0.95, ETHANOL, WATER).unwrap();
        assert!((x - 0.855_676_706).abs() < 1e-8);
    }

    #[test]
    fn ethanol_feed_volume_basis() {
        let x = volume_to_mole_fraction(0.13, ETHANOL, WATER).unwrap();
        assert!((x - 0.044_55).abs() < 1e-5);
    }

    #[test]
    fn ethanol_bottoms_mass_basis() {
        let x = mass_to_mole_fraction(0.03, 46.07, 18.02).unwrap();
        assert!((x - 0.011_952_640_5).abs() < 1e-9);
    }

    #[test]
    fn pure_ends_are_preserved() {
        assert_eq!(mass_to_mole_fraction(0.0, 46.07, 18.02).unwrap(), 0.0);
        assert_eq!(mass_to_mole_fraction(1.0, 46.07, 18.02).unwrap(), 1.0);
    }

    #[test]
    fn rejects_out_of_range_fraction() {
        assert!(matches!(
            volume_to_mole_fraction(1.2, ETHANOL, WATER),
            Err(VleError::OutOfRange { .. })
        ));
        assert!(mass_to_mole_fraction(0.5, 0.0, 18.02).is_err());
    }

    #[test]
    fn mixture_weight_interpolates() {
        assert!((mixture_molecular_weight(0.5, 46.07, 18.02) - 32.045).abs() < 1e-12);
    }
}
