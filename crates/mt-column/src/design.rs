//! Single-reflux column design: lines plus stage count.

use crate::error::{ColumnError, ColumnResult};
use crate::lines::{OperatingLines, solve_operating_lines, solve_q_line};
use crate::spec::ProcessSpec;
use crate::stages::{StageConfig, StageResult, count_stages};
use mt_vle::EquilibriumCurve;

/// Overall tray efficiency used when a case does not give one.
pub const DEFAULT_TRAY_EFFICIENCY: f64 = 0.671;

/// Lines and stage count for one process specification.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDesign {
    pub spec: ProcessSpec,
    pub lines: OperatingLines,
    pub stages: StageResult,
}

/// Step of [`design_column_steps`] that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignStep {
    Validate,
    QLine,
    OperatingLines,
    StageCount,
}

/// Validate `spec`, build its operating lines and step off stages on `curve`.
pub fn design_column(
    curve: &EquilibriumCurve,
    spec: &ProcessSpec,
    tray_efficiency: f64,
    config: StageConfig,
) -> ColumnResult<ColumnDesign> {
    design_column_steps(curve, spec, tray_efficiency, config).map_err(|(_, e)| e)
}

/// Same as [`design_column`], with failures tagged by the step that raised them.
pub fn design_column_steps(
    curve: &EquilibriumCurve,
    spec: &ProcessSpec,
    tray_efficiency: f64,
    config: StageConfig,
) -> Result<ColumnDesign, (DesignStep, ColumnError)> {
    let at = |step: DesignStep| move |e: ColumnError| (step, e);

    spec.validate().map_err(at(DesignStep::Validate))?;
    let q_line = solve_q_line(spec.q, spec.xf).map_err(at(DesignStep::QLine))?;
    let lines = solve_operating_lines(spec.reflux, q_line, spec.xd, spec.xb)
        .map_err(at(DesignStep::OperatingLines))?;
    let count = count_stages(
        curve,
        spec.xb,
        spec.xd,
        &lines.enriching,
        &lines.stripping,
        config,
    )
    .map_err(at(DesignStep::StageCount))?;
    let stages = StageResult::from_count(count, curve, tray_efficiency)
        .map_err(at(DesignStep::StageCount))?;
    Ok(ColumnDesign {
        spec: *spec,
        lines,
        stages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ideal_curve() -> EquilibriumCurve {
        let x: Vec<f64> = (0..2000).map(|i| i as f64 / 2000.0).collect();
        let y = x.iter().map(|&x| 4.0 * x / (1.0 + 3.0 * x)).collect();
        EquilibriumCurve::from_columns(x, y, None).unwrap()
    }

    fn spec(q: f64, reflux: f64) -> ProcessSpec {
        ProcessSpec {
            xf: 0.5,
            xd: 0.95,
            xb: 0.05,
            reflux,
            q,
        }
    }

    fn failing_step(spec: &ProcessSpec) -> DesignStep {
        let (step, _) = design_column_steps(
            &ideal_curve(),
            spec,
            DEFAULT_TRAY_EFFICIENCY,
            StageConfig::default(),
        )
        .unwrap_err();
        step
    }

    #[test]
    fn failures_are_tagged_with_their_step() {
        let inverted = ProcessSpec {
            xb: 0.6,
            ..spec(1.5, 3.0)
        };
        assert_eq!(failing_step(&inverted), DesignStep::Validate);
        assert_eq!(failing_step(&spec(1.0, 3.0)), DesignStep::QLine);
        assert_eq!(failing_step(&spec(-3.0, 3.0)), DesignStep::OperatingLines);
        assert_eq!(failing_step(&spec(1.5, 0.1)), DesignStep::StageCount);
    }

    #[test]
    fn untagged_design_matches_tagged() {
        let curve = ideal_curve();
        let a = design_column(&curve, &spec(1.5, 3.0), 0.671, StageConfig::default()).unwrap();
        let b =
            design_column_steps(&curve, &spec(1.5, 3.0), 0.671, StageConfig::default()).unwrap();
        assert_eq!(a, b);
        assert!(a.stages.actual_stages >= a.stages.theoretical_stages);
    }
}
