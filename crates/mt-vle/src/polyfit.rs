//! Least-squares polynomial fitting.
//!
//! The Vandermonde matrix of a degree-10 fit over `[0, 1]` is badly
//! conditioned, so columns are scaled to unit norm and the system is solved
//! through an SVD rather than the normal equations.

use crate::error::{VleError, VleResult};
use mt_core::numeric::ensure_finite;
use nalgebra::{DMatrix, DVector};

/// Singular values below this (relative to the largest) are treated as zero.
const SVD_RCOND: f64 = 1e-14;

/// Polynomial in power-series form, lowest order coefficient first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner evaluation.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }
}

/// Number of distinct values in `xs`.
pub fn distinct_count(xs: &[f64]) -> usize {
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted.len()
}

/// Fit a polynomial of `degree` to `(xs, ys)` in the least-squares sense.
pub fn fit_polynomial(xs: &[f64], ys: &[f64], degree: usize) -> VleResult<Polynomial> {
    if xs.len() != ys.len() {
        return Err(VleError::InvalidArg {
            what: "x and y sample counts differ",
        });
    }
    for (&x, &y) in xs.iter().zip(ys) {
        ensure_finite(x, "sample liquid fraction")?;
        ensure_finite(y, "sample value")?;
    }

    let required = degree + 1;
    let distinct = distinct_count(xs);
    if distinct < required {
        return Err(VleError::InsufficientData {
            degree,
            required,
            distinct,
        });
    }

    let rows = xs.len();
    let cols = required;
    let mut vandermonde = DMatrix::from_fn(rows, cols, |i, j| xs[i].powi(j as i32));

    let mut scales = Vec::with_capacity(cols);
    for j in 0..cols {
        let norm = vandermonde.column(j).norm();
        let scale = if norm > 0.0 { norm } else { 1.0 };
        vandermonde.column_mut(j).unscale_mut(scale);
        scales.push(scale);
    }

    let rhs = DVector::from_column_slice(ys);
    let svd = vandermonde.svd(true, true);
    let max_sv = svd.singular_values.max();
    let scaled = svd
        .solve(&rhs, max_sv * SVD_RCOND)
        .map_err(|e| VleError::Numeric {
            what: format!("least-squares solve failed: {e}"),
        })?;

    let coefficients: Vec<f64> = scaled
        .iter()
        .zip(&scales)
        .map(|(c, s)| c / s)
        .collect();

    for &c in &coefficients {
        ensure_finite(c, "polynomial coefficient")?;
    }

    Ok(Polynomial::new(coefficients))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_eval() {
        // 1 + 2x + 3x^2
        let p = Polynomial::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(p.degree(), 2);
        assert!((p.eval(2.0) - 17.0).abs() < 1e-12);
    }

    #[test]
    fn straight_line_fit_is_exact() {
        let xs = [0.0, 0.25, 0.5, 1.0];
        let ys: Vec<f64> = xs.iter().map(|x| 0.5 + 2.0 * x).collect();
        let p = fit_polynomial(&xs, &ys, 1).unwrap();
        assert!((p.coefficients()[0] - 0.5).abs() < 1e-10);
        assert!((p.coefficients()[1] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn overdetermined_fit_minimises_residual() {
        // Best constant for {0, 1, 2} is the mean
        let p = fit_polynomial(&[0.0, 0.5, 1.0], &[0.0, 1.0, 2.0], 0).unwrap();
        assert!((p.eval(0.3) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn duplicate_x_values_do_not_count() {
        let xs = [0.1, 0.1, 0.1, 0.2];
        let ys = [0.2, 0.2, 0.2, 0.3];
        let err = fit_polynomial(&xs, &ys, 2).unwrap_err();
        assert_eq!(
            err,
            VleError::InsufficientData {
                degree: 2,
                required: 3,
                distinct: 2
            }
        );
    }

    #[test]
    fn rejects_mismatched_lengths() {
        assert!(matches!(
            fit_polynomial(&[0.0, 1.0], &[0.0], 1),
            Err(VleError::InvalidArg { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn recovers_generating_polynomial(
            coeffs in prop::collection::vec(-1.0_f64..1.0_f64, 1..=11),
        ) {
            let truth = Polynomial::new(coeffs);
            let xs: Vec<f64> = (0..200).map(|i| i as f64 / 199.0).collect();
            let ys: Vec<f64> = xs.iter().map(|&x| truth.eval(x)).collect();

            let fitted = fit_polynomial(&xs, &ys, 10).unwrap();
            for &x in &xs {
                prop_assert!((fitted.eval(x) - truth.eval(x)).abs() < 1e-7);
            }
        }
    }
}
