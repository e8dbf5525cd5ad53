//! Smooth equilibrium curves from sparse samples.

use crate::curve::{EquilibriumCurve, EquilibriumPoint};
use crate::error::{VleError, VleResult};
use crate::polyfit::{Polynomial, fit_polynomial};
use mt_core::numeric::unit_grid;
use tracing::debug;

/// Fit configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Polynomial degree
    pub degree: usize,
    /// Number of grid points over `[0, 1)` in the resampled curve
    pub resolution: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            degree: 10,
            resolution: 5000,
        }
    }
}

/// Polynomials fitted to one set of samples.
#[derive(Debug, Clone)]
pub struct FittedEquilibrium {
    /// y(x)
    pub vapor: Polynomial,
    /// T(x) in K, present when every sample carried a temperature
    pub temperature: Option<Polynomial>,
    /// Root-mean-square residual of the vapor fit
    pub vapor_rms: f64,
}

impl FittedEquilibrium {
    /// Evaluate the fitted polynomials on the uniform grid `i / resolution`.
    ///
    /// Values are not clamped: near `x = 0` and `x = 1` the polynomial can
    /// leave `[0, 1]`.
    pub fn resample(&self, resolution: usize) -> VleResult<EquilibriumCurve> {
        if resolution < 2 {
            return Err(VleError::InvalidArg {
                what: "curve resolution must be at least 2",
            });
        }
        let x = unit_grid(resolution);
        let y = x.iter().map(|&xi| self.vapor.eval(xi)).collect();
        let temperature_k = self
            .temperature
            .as_ref()
            .map(|p| x.iter().map(|&xi| p.eval(xi)).collect());
        EquilibriumCurve::from_columns(x, y, temperature_k)
    }
}

/// Fit polynomials to equilibrium samples without resampling.
pub fn fit_polynomials(points: &[EquilibriumPoint], degree: usize) -> VleResult<FittedEquilibrium> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();

    let vapor = fit_polynomial(&xs, &ys, degree)?;
    let vapor_rms = rms_residual(&vapor, &xs, &ys);

    let temperatures: Option<Vec<f64>> = points.iter().map(|p| p.temperature_k).collect();
    let temperature = match temperatures {
        Some(ts) if !ts.is_empty() => Some(fit_polynomial(&xs, &ts, degree)?),
        _ => None,
    };

    debug!(
        samples = points.len(),
        degree,
        vapor_rms,
        with_temperature = temperature.is_some(),
        "fitted equilibrium polynomial"
    );

    Ok(FittedEquilibrium {
        vapor,
        temperature,
        vapor_rms,
    })
}

/// Fit a degree-`options.degree` polynomial to `points` and resample it onto a
/// dense uniform grid over `[0, 1)`.
pub fn fit(points: &[EquilibriumPoint], options: FitOptions) -> VleResult<EquilibriumCurve> {
    fit_polynomials(points, options.degree)?.resample(options.resolution)
}

fn rms_residual(poly: &Polynomial, xs: &[f64], ys: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| (poly.eval(x) - y).powi(2))
        .sum();
    (sum_sq / xs.len() as f64).sqrt()
}
