//! Equilibrium data and curve fitting errors.

use mt_core::CoreError;
use thiserror::Error;

/// Result type for VLE operations.
pub type VleResult<T> = Result<T, VleError>;

/// Errors that can occur while fitting or building an equilibrium curve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VleError {
    /// Too few distinct liquid fractions for the requested polynomial degree.
    #[error("Insufficient data: degree {degree} fit needs {required} distinct x values, got {distinct}")]
    InsufficientData {
        degree: usize,
        required: usize,
        distinct: usize,
    },

    /// NaN or infinite input.
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// Value outside its physical range.
    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Linear algebra failure during the least-squares solve.
    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

impl From<CoreError> for VleError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } => VleError::NonFinite { what, value },
            CoreError::OutOfRange { what, value } => VleError::OutOfRange { what, value },
            CoreError::InvalidArg { what } | CoreError::Invariant { what } => {
                VleError::InvalidArg { what }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = VleError::InsufficientData {
            degree: 10,
            required: 11,
            distinct: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("11"));
        assert!(msg.contains("got 4"));
    }

    #[test]
    fn core_error_keeps_its_value() {
        let err: VleError = CoreError::OutOfRange {
            what: "x",
            value: 1.5,
        }
        .into();
        assert_eq!(
            err,
            VleError::OutOfRange {
                what: "x",
                value: 1.5
            }
        );
    }
}
