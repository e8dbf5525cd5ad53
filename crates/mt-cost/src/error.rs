//! Cost model errors.

use mt_column::ColumnError;
use mt_core::CoreError;
use mt_vle::VleError;
use thiserror::Error;

pub type CostResult<T> = Result<T, CostError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CostError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("No bottoms temperature: the equilibrium curve has no temperature column and the plant basis gives none")]
    MissingBottomsTemperature,

    #[error("No feasible reflux ratio among {attempted} sweep points")]
    NoFeasiblePoint { attempted: usize },

    #[error("Column error: {0}")]
    Column(#[from] ColumnError),

    #[error("Composition error: {0}")]
    Composition(#[from] VleError),
}

impl From<CoreError> for CostError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, value } => CostError::NonFinite { what, value },
            other => CostError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
