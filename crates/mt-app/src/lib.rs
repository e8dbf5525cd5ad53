//! Shared application service layer for mccabe.
//!
//! Loads design cases and equilibrium data, runs the fit, stage count, cost
//! and reflux sweep pipeline, and turns the results into reports for the CLI
//! and other frontends.

pub mod case_service;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod vle_loader;

pub use case_service::{
    CaseParams, load_case, resolve_case, save_case, validate_case, vle_path,
};
pub use error::{AppError, AppResult, ErrorKind, PipelineError, PipelineStage};
pub use pipeline::{
    CaseEvaluation, DesignOptions, DesignOutput, OptimizationOutput, design_column,
    design_on_curve, evaluate_case, fit_curve, optimize_reflux,
};
pub use report::{
    CostReport, DesignReport, LineReport, SweepPointReport, SweepReport, curve_csv, lines_csv,
    staircase_csv,
};
pub use vle_loader::{load_vle_csv, parse_vle_csv};
