//! McCabe-Thiele column design for binary distillation.
//!
//! This crate builds the q-line, enriching line and stripping line for a
//! process specification and steps off theoretical stages between them on a
//! dense equilibrium curve. Stage counts are corrected to real trays with an
//! overall tray efficiency.

pub mod design;
pub mod error;
pub mod lines;
pub mod spec;
pub mod stages;

pub use design::{
    ColumnDesign, DEFAULT_TRAY_EFFICIENCY, DesignStep, design_column, design_column_steps,
};
pub use error::{ColumnError, ColumnResult};
pub use lines::{
    Line, OperatingLines, enriching_line, solve_operating_lines, solve_q_line, thermal_quality,
};
pub use spec::ProcessSpec;
pub use stages::{StageConfig, StageCount, StageResult, actual_stages, count_stages};
