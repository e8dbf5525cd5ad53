//! mt-vle: vapor-liquid equilibrium curves for binary distillation.
//!
//! Provides:
//! - `EquilibriumPoint` samples and the dense `EquilibriumCurve`
//! - least-squares polynomial fitting (`fit`, `fit_polynomial`)
//! - composition basis conversions (volume/mass fraction to mole fraction)
//!
//! # Example
//!
//! ```
//! use mt_vle::{EquilibriumPoint, FitOptions, fit};
//!
//! let alpha = 2.4;
//! let samples: Vec<EquilibriumPoint> = (0..=20)
//!     .map(|i| {
//!         let x = i as f64 / 20.0;
//!         EquilibriumPoint::new(x, alpha * x / (1.0 + (alpha - 1.0) * x))
//!     })
//!     .collect();
//!
//! let curve = fit(&samples, FitOptions::default()).unwrap();
//! assert_eq!(curve.len(), 5000);
//! ```

pub mod composition;
pub mod curve;
pub mod error;
pub mod fitter;
pub mod polyfit;

pub use composition::{
    ComponentProps, mass_to_mole_fraction, mixture_molecular_weight, volume_to_mole_fraction,
};
pub use curve::{EquilibriumCurve, EquilibriumPoint};
pub use error::{VleError, VleResult};
pub use fitter::{FitOptions, FittedEquilibrium, fit, fit_polynomials};
pub use polyfit::{Polynomial, fit_polynomial};
