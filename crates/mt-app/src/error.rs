//! Error types for the mt-app service layer.

use mt_column::{ColumnError, DesignStep};
use mt_cost::CostError;
use mt_vle::VleError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Step of the design pipeline a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineStage {
    Validate,
    Fit,
    QLine,
    OperatingLines,
    StageCount,
    Cost,
    Sweep,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validate => "validate",
            Self::Fit => "fit",
            Self::QLine => "q-line",
            Self::OperatingLines => "operating lines",
            Self::StageCount => "stage count",
            Self::Cost => "cost",
            Self::Sweep => "sweep",
        };
        f.write_str(name)
    }
}

impl From<DesignStep> for PipelineStage {
    fn from(step: DesignStep) -> Self {
        match step {
            DesignStep::Validate => Self::Validate,
            DesignStep::QLine => Self::QLine,
            DesignStep::OperatingLines => Self::OperatingLines,
            DesignStep::StageCount => Self::StageCount,
        }
    }
}

/// Discriminant of a pipeline failure, independent of the crate that raised
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InsufficientData,
    DegenerateLine,
    NoIntersection,
    NonConvergence,
    CurveExhausted,
    InvalidSpecification,
    InvalidArgument,
    NonFinite,
    NoFeasiblePoint,
    MissingData,
    Numeric,
}

impl From<&VleError> for ErrorKind {
    fn from(err: &VleError) -> Self {
        match err {
            VleError::InsufficientData { .. } => Self::InsufficientData,
            VleError::NonFinite { .. } => Self::NonFinite,
            VleError::OutOfRange { .. } | VleError::InvalidArg { .. } => Self::InvalidArgument,
            VleError::Numeric { .. } => Self::Numeric,
        }
    }
}

impl From<&ColumnError> for ErrorKind {
    fn from(err: &ColumnError) -> Self {
        match err {
            ColumnError::InvalidSpecification { .. } => Self::InvalidSpecification,
            ColumnError::DegenerateLine { .. } => Self::DegenerateLine,
            ColumnError::NoIntersection { .. } => Self::NoIntersection,
            ColumnError::NonConvergence { .. } => Self::NonConvergence,
            ColumnError::CurveExhausted { .. } => Self::CurveExhausted,
            ColumnError::InvalidArg { .. } => Self::InvalidArgument,
        }
    }
}

impl From<&CostError> for ErrorKind {
    fn from(err: &CostError) -> Self {
        match err {
            CostError::InvalidArg { .. } => Self::InvalidArgument,
            CostError::NonFinite { .. } => Self::NonFinite,
            CostError::MissingBottomsTemperature => Self::MissingData,
            CostError::NoFeasiblePoint { .. } => Self::NoFeasiblePoint,
            CostError::Column(e) => e.into(),
            CostError::Composition(e) => e.into(),
        }
    }
}

/// A pipeline failure tagged with the stage that raised it.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{stage} failed ({kind:?}): {message}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    pub kind: ErrorKind,
    pub message: String,
}

impl PipelineError {
    pub fn new(stage: PipelineStage, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            stage,
            kind,
            message: message.into(),
        }
    }

    pub fn vle(stage: PipelineStage, err: &VleError) -> Self {
        Self::new(stage, err.into(), err.to_string())
    }

    pub fn column(stage: PipelineStage, err: &ColumnError) -> Self {
        Self::new(stage, err.into(), err.to_string())
    }

    pub fn cost(stage: PipelineStage, err: &CostError) -> Self {
        Self::new(stage, err.into(), err.to_string())
    }
}

/// Application error type shared by the CLI and library callers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write case file: {path}")]
    CaseFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case error: {0}")]
    Case(String),

    #[error("Case validation failed: {0}")]
    Validation(String),

    #[error("Failed to read equilibrium data: {path}")]
    VleFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Equilibrium data line {line}: {message}")]
    VleParse { line: usize, message: String },

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mt-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_cost_errors_keep_their_kind() {
        let err = CostError::Column(ColumnError::NonConvergence {
            max_stages: 100,
            last_x: 0.3,
        });
        let p = PipelineError::cost(PipelineStage::Sweep, &err);
        assert_eq!(p.kind, ErrorKind::NonConvergence);
        assert_eq!(p.stage, PipelineStage::Sweep);
    }

    #[test]
    fn message_names_the_stage() {
        let err = ColumnError::DegenerateLine {
            what: "q = 1 gives a vertical q-line",
        };
        let p = PipelineError::column(PipelineStage::QLine, &err);
        let text = p.to_string();
        assert!(text.starts_with("q-line failed (DegenerateLine)"), "{text}");
    }
}
