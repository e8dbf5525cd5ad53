//! Equilibrium samples and the dense equilibrium curve.

use crate::error::{VleError, VleResult};
use mt_core::numeric::ensure_finite;
use mt_core::units::{Temperature, k};

/// One measured (or tabulated) vapor-liquid equilibrium point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumPoint {
    /// Mole fraction of the light component in the liquid
    pub x: f64,
    /// Mole fraction of the light component in the vapor
    pub y: f64,
    /// Bubble-point temperature in K, when the source has one
    pub temperature_k: Option<f64>,
}

impl EquilibriumPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            temperature_k: None,
        }
    }

    pub fn with_temperature(x: f64, y: f64, temperature_k: f64) -> Self {
        Self {
            x,
            y,
            temperature_k: Some(temperature_k),
        }
    }
}

/// Dense equilibrium curve on an increasing liquid-fraction grid.
///
/// Vapor fractions are kept exactly as produced by the fit, including values
/// slightly outside `[0, 1]` near the ends of the grid.
#[derive(Debug, Clone)]
pub struct EquilibriumCurve {
    x: Vec<f64>,
    y: Vec<f64>,
    temperature_k: Option<Vec<f64>>,
    /// Running maximum of `y`; monotone, so threshold searches can bisect.
    y_envelope: Vec<f64>,
}

impl EquilibriumCurve {
    /// Build a curve from parallel columns.
    ///
    /// `x` must be strictly increasing and every value finite.
    pub fn from_columns(
        x: Vec<f64>,
        y: Vec<f64>,
        temperature_k: Option<Vec<f64>>,
    ) -> VleResult<Self> {
        if x.is_empty() {
            return Err(VleError::InvalidArg {
                what: "empty equilibrium curve",
            });
        }
        if x.len() != y.len() {
            return Err(VleError::InvalidArg {
                what: "x and y columns differ in length",
            });
        }
        if let Some(t) = &temperature_k {
            if t.len() != x.len() {
                return Err(VleError::InvalidArg {
                    what: "temperature column differs in length",
                });
            }
            for &v in t {
                ensure_finite(v, "curve temperature")?;
            }
        }
        for (&xi, &yi) in x.iter().zip(&y) {
            ensure_finite(xi, "curve liquid fraction")?;
            ensure_finite(yi, "curve vapor fraction")?;
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(VleError::InvalidArg {
                what: "curve liquid fractions must be strictly increasing",
            });
        }

        let y_envelope = y
            .iter()
            .scan(f64::NEG_INFINITY, |max, &v| {
                *max = max.max(v);
                Some(*max)
            })
            .collect();

        Ok(Self {
            x,
            y,
            temperature_k,
            y_envelope,
        })
    }

    /// Build a curve directly from samples, without fitting.
    ///
    /// Samples are sorted by `x`; temperatures are kept only if every sample
    /// has one.
    pub fn from_points(points: &[EquilibriumPoint]) -> VleResult<Self> {
        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
        let x = sorted.iter().map(|p| p.x).collect();
        let y = sorted.iter().map(|p| p.y).collect();
        let temperature_k = sorted.iter().map(|p| p.temperature_k).collect();
        Self::from_columns(x, y, temperature_k)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn liquid(&self) -> &[f64] {
        &self.x
    }

    pub fn vapor(&self) -> &[f64] {
        &self.y
    }

    pub fn temperatures_k(&self) -> Option<&[f64]> {
        self.temperature_k.as_deref()
    }

    pub fn has_temperatures(&self) -> bool {
        self.temperature_k.is_some()
    }

    /// (x, y) at `index`.
    pub fn point(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.x.get(index)?, *self.y.get(index)?))
    }

    /// Bubble-point temperature at `index`, if the curve carries temperatures.
    pub fn temperature_at(&self, index: usize) -> Option<Temperature> {
        self.temperature_k
            .as_ref()
            .and_then(|t| t.get(index))
            .map(|&v| k(v))
    }

    /// Index of the first point, in increasing `x`, whose vapor fraction is at
    /// least `y_target`.
    ///
    /// Equivalent to a forward linear scan; bisects the running maximum of
    /// the vapor column instead.
    pub fn first_reaching(&self, y_target: f64) -> Option<usize> {
        let idx = self.y_envelope.partition_point(|&max| max < y_target);
        (idx < self.y_envelope.len()).then_some(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}
