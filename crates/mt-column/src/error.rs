//! Error types for column design operations.

use mt_core::CoreError;
use thiserror::Error;

/// Errors that can occur while constructing operating lines or stepping off
/// stages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColumnError {
    #[error("Invalid process specification: {what}")]
    InvalidSpecification { what: String },

    #[error("Degenerate line: {what}")]
    DegenerateLine { what: &'static str },

    #[error("No intersection: {what} (slopes {slope_a} and {slope_b})")]
    NoIntersection {
        what: &'static str,
        slope_a: f64,
        slope_b: f64,
    },

    #[error("Stage count exceeded {max_stages} stages (last liquid fraction {last_x})")]
    NonConvergence { max_stages: usize, last_x: f64 },

    #[error("Equilibrium curve exhausted at stage {stage}: no point reaches vapor fraction {y_target}")]
    CurveExhausted { stage: usize, y_target: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}

pub type ColumnResult<T> = Result<T, ColumnError>;

impl From<CoreError> for ColumnError {
    fn from(e: CoreError) -> Self {
        ColumnError::InvalidArg {
            what: e.to_string(),
        }
    }
}
