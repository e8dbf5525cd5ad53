//! Design pipeline: fit, lines, stage count, costs and the reflux sweep.
//!
//! Every entry point reports failures as a [`PipelineError`] naming the stage
//! that raised it.

use mt_column::{Line, ProcessSpec, StageConfig, StageResult, design_column_steps};
use mt_cost::{
    CostBreakdown, CostError, ProcessFlows, SweepInputs, SweepResult, evaluate_costs, sweep_reflux,
};
use mt_vle::{EquilibriumCurve, EquilibriumPoint, FitOptions, fit};
use tracing::info;

use crate::case_service::CaseParams;
use crate::error::{PipelineError, PipelineStage};

/// Options of a single-reflux design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignOptions {
    pub fit: FitOptions,
    pub tray_efficiency: f64,
    pub stage_config: StageConfig,
}

impl Default for DesignOptions {
    fn default() -> Self {
        Self {
            fit: FitOptions::default(),
            tray_efficiency: mt_column::DEFAULT_TRAY_EFFICIENCY,
            stage_config: StageConfig::default(),
        }
    }
}

impl From<&CaseParams> for DesignOptions {
    fn from(params: &CaseParams) -> Self {
        Self {
            fit: params.fit,
            tray_efficiency: params.tray_efficiency,
            stage_config: params.stage_config,
        }
    }
}

/// Everything needed to draw and report one McCabe-Thiele construction.
#[derive(Debug, Clone)]
pub struct DesignOutput {
    pub curve: EquilibriumCurve,
    pub spec: ProcessSpec,
    pub q_line: Line,
    pub enriching: Line,
    pub stripping: Line,
    /// Where the q-line meets the enriching line
    pub intersection: (f64, f64),
    pub stages: StageResult,
}

/// Fit equilibrium samples onto the dense curve.
pub fn fit_curve(
    samples: &[EquilibriumPoint],
    options: FitOptions,
) -> Result<EquilibriumCurve, PipelineError> {
    fit(samples, options).map_err(|e| PipelineError::vle(PipelineStage::Fit, &e))
}

/// Lines and stage count on an already fitted curve.
pub fn design_on_curve(
    curve: EquilibriumCurve,
    spec: &ProcessSpec,
    options: &DesignOptions,
) -> Result<DesignOutput, PipelineError> {
    let design = design_column_steps(&curve, spec, options.tray_efficiency, options.stage_config)
        .map_err(|(step, e)| PipelineError::column(PipelineStage::from(step), &e))?;
    let lines = design.lines;
    let stages = design.stages;

    info!(
        reflux = spec.reflux,
        theoretical = stages.theoretical_stages,
        actual = stages.actual_stages,
        "Column designed"
    );

    Ok(DesignOutput {
        curve,
        spec: *spec,
        q_line: lines.q_line,
        enriching: lines.enriching,
        stripping: lines.stripping,
        intersection: lines.intersection,
        stages,
    })
}

/// Fit `samples` and design the column for `spec`.
pub fn design_column(
    samples: &[EquilibriumPoint],
    spec: &ProcessSpec,
    options: &DesignOptions,
) -> Result<DesignOutput, PipelineError> {
    spec.validate()
        .map_err(|e| PipelineError::column(PipelineStage::Validate, &e))?;
    let curve = fit_curve(samples, options.fit)?;
    design_on_curve(curve, spec, options)
}

/// A single-reflux design with its costs.
#[derive(Debug, Clone)]
pub struct CaseEvaluation {
    pub design: DesignOutput,
    pub flows: ProcessFlows,
    pub costs: CostBreakdown,
}

/// Design and price a case at its own reflux ratio.
pub fn evaluate_case(
    samples: &[EquilibriumPoint],
    params: &CaseParams,
) -> Result<CaseEvaluation, PipelineError> {
    let design = design_column(samples, &params.spec, &DesignOptions::from(params))?;

    let cost_error = |e: CostError| PipelineError::cost(PipelineStage::Cost, &e);
    let spec = &params.spec;
    let flows =
        ProcessFlows::from_production(&params.basis, spec.xf, spec.xd, spec.xb).map_err(cost_error)?;
    let costs = evaluate_costs(&params.constants, &params.basis, &flows, spec, &design.stages)
        .map_err(cost_error)?;

    info!(
        case = %params.name,
        cost = costs.total_break_even_cost,
        "Case evaluated"
    );
    Ok(CaseEvaluation {
        design,
        flows,
        costs,
    })
}

/// Sweep outcome with the curve it ran on.
#[derive(Debug, Clone)]
pub struct OptimizationOutput {
    pub curve: EquilibriumCurve,
    pub sweep: SweepResult,
}

/// Fit once and sweep the case's reflux range for the cheapest design.
pub fn optimize_reflux(
    samples: &[EquilibriumPoint],
    params: &CaseParams,
) -> Result<OptimizationOutput, PipelineError> {
    params
        .spec
        .validate()
        .map_err(|e| PipelineError::column(PipelineStage::Validate, &e))?;
    let curve = fit_curve(samples, params.fit)?;

    let inputs = SweepInputs {
        curve: &curve,
        spec: params.spec,
        basis: &params.basis,
        constants: &params.constants,
        tray_efficiency: params.tray_efficiency,
        stage_config: params.stage_config,
    };
    let sweep = sweep_reflux(&inputs, &params.sweep)
        .map_err(|e| PipelineError::cost(PipelineStage::Sweep, &e))?;

    Ok(OptimizationOutput { curve, sweep })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn ideal_samples(alpha: f64) -> Vec<EquilibriumPoint> {
        (0..=40)
            .map(|i| {
                let x = i as f64 / 40.0;
                EquilibriumPoint::new(x, alpha * x / (1.0 + (alpha - 1.0) * x))
            })
            .collect()
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

    #[test]
    fn ideal_mixture_design() {
        let out = design_column(&ideal_samples(4.0), &spec(1.5, 3.0), &DesignOptions::default())
            .unwrap();
        assert_eq!(out.curve.len(), 5000);
        assert!(out.stages.theoretical_stages >= 5);
        assert!(out.stages.actual_stages >= out.stages.theoretical_stages);
        let (ix, iy) = out.intersection;
        assert!((out.enriching.at(ix) - iy).abs() < 1e-12);
        assert!((out.stripping.at(ix) - iy).abs() < 1e-12);
    }

    #[test]
    fn failures_name_their_stage() {
        let options = DesignOptions::default();
        let samples = ideal_samples(4.0);

        let err = design_column(&samples, &spec(1.0, 3.0), &options).unwrap_err();
        assert_eq!(err.stage, PipelineStage::QLine);
        assert_eq!(err.kind, ErrorKind::DegenerateLine);

        let err = design_column(&samples, &spec(-3.0, 3.0), &options).unwrap_err();
        assert_eq!(err.stage, PipelineStage::OperatingLines);
        assert_eq!(err.kind, ErrorKind::NoIntersection);

        let err = design_column(&samples[..5], &spec(1.5, 3.0), &options).unwrap_err();
        assert_eq!(err.stage, PipelineStage::Fit);
        assert_eq!(err.kind, ErrorKind::InsufficientData);

        let bad = ProcessSpec {
            xb: 0.6,
            ..spec(1.5, 3.0)
        };
        let err = design_column(&samples, &bad, &options).unwrap_err();
        assert_eq!(err.stage, PipelineStage::Validate);
        assert_eq!(err.kind, ErrorKind::InvalidSpecification);
    }

    #[test]
    fn pinch_is_a_stage_count_failure() {
        let err = design_column(
            &ideal_samples(1.5),
            &spec(1.5, 0.5),
            &DesignOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.stage, PipelineStage::StageCount);
        assert_eq!(err.kind, ErrorKind::NonConvergence);
    }
}
