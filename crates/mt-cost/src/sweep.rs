//! Reflux ratio sweep for the break-even cost minimum.
//!
//! Every reflux ratio is an independent design: lines, stage count and
//! costs. Points are evaluated in parallel over the same fitted curve and
//! reported in input order; failed points stay in the result.

use crate::breakdown::{CostBreakdown, evaluate_costs};
use crate::constants::CostConstants;
use crate::error::{CostError, CostResult};
use crate::flows::{PlantBasis, ProcessFlows};
use mt_column::{ColumnDesign, ProcessSpec, StageConfig, design_column};
use mt_core::numeric::{ensure_finite, linspace};
use mt_vle::EquilibriumCurve;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Linearly spaced reflux ratios, both ends included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefluxSweep {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
}

impl RefluxSweep {
    pub fn new(start: f64, end: f64, num_points: usize) -> CostResult<Self> {
        let sweep = Self {
            start,
            end,
            num_points,
        };
        sweep.validate()?;
        Ok(sweep)
    }

    pub fn validate(&self) -> CostResult<()> {
        ensure_finite(self.start, "sweep start")?;
        ensure_finite(self.end, "sweep end")?;
        if self.num_points < 2 {
            return Err(CostError::InvalidArg {
                what: format!("sweep needs at least 2 points, got {}", self.num_points),
            });
        }
        if !(self.start > 0.0 && self.start < self.end) {
            return Err(CostError::InvalidArg {
                what: format!(
                    "sweep needs 0 < start < end, got [{}, {}]",
                    self.start, self.end
                ),
            });
        }
        Ok(())
    }

    pub fn points(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.num_points)
    }
}

impl Default for RefluxSweep {
    fn default() -> Self {
        Self {
            start: 2.8,
            end: 10.0,
            num_points: 100,
        }
    }
}

/// Everything a sweep point needs besides its reflux ratio.
#[derive(Debug, Clone, Copy)]
pub struct SweepInputs<'a> {
    pub curve: &'a EquilibriumCurve,
    /// Compositions and q; the reflux ratio is replaced per point
    pub spec: ProcessSpec,
    pub basis: &'a PlantBasis,
    pub constants: &'a CostConstants,
    pub tray_efficiency: f64,
    pub stage_config: StageConfig,
}

/// A feasible design and its costs.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedPoint {
    pub design: ColumnDesign,
    pub costs: CostBreakdown,
}

impl EvaluatedPoint {
    pub fn total_cost(&self) -> f64 {
        self.costs.total_break_even_cost
    }
}

/// One reflux ratio and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub reflux: f64,
    pub outcome: Result<EvaluatedPoint, CostError>,
}

/// Cheapest feasible point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOptimum {
    /// Index into [`SweepResult::points`]
    pub index: usize,
    pub reflux: f64,
    pub total_cost: f64,
    pub theoretical_stages: usize,
    pub actual_stages: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub flows: ProcessFlows,
    /// In input reflux order
    pub points: Vec<SweepPoint>,
    pub optimum: SweepOptimum,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    pub fn reflux_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.reflux).collect()
    }

    /// Total cost per point, `None` where the point failed
    pub fn total_costs(&self) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|p| p.outcome.as_ref().ok().map(EvaluatedPoint::total_cost))
            .collect()
    }

    /// Actual stage count per point, `None` where the point failed
    pub fn actual_stages(&self) -> Vec<Option<usize>> {
        self.points
            .iter()
            .map(|p| {
                p.outcome
                    .as_ref()
                    .ok()
                    .map(|e| e.design.stages.actual_stages)
            })
            .collect()
    }

    pub fn optimal_point(&self) -> Option<&EvaluatedPoint> {
        self.points
            .get(self.optimum.index)
            .and_then(|p| p.outcome.as_ref().ok())
    }
}

/// Design and price the column at one reflux ratio.
pub fn evaluate_point(
    inputs: &SweepInputs<'_>,
    flows: &ProcessFlows,
    reflux: f64,
) -> CostResult<EvaluatedPoint> {
    let spec = inputs.spec.with_reflux(reflux);
    let design = design_column(
        inputs.curve,
        &spec,
        inputs.tray_efficiency,
        inputs.stage_config,
    )?;
    let costs = evaluate_costs(inputs.constants, inputs.basis, flows, &spec, &design.stages)?;
    Ok(EvaluatedPoint { design, costs })
}

/// Lowest total cost; exact ties go to the lower reflux ratio.
fn select_optimum(points: &[SweepPoint]) -> Option<SweepOptimum> {
    let mut best: Option<SweepOptimum> = None;
    for (index, point) in points.iter().enumerate() {
        let Ok(evaluated) = &point.outcome else {
            continue;
        };
        let cost = evaluated.total_cost();
        let better = match &best {
            None => true,
            Some(b) => cost < b.total_cost || (cost == b.total_cost && point.reflux < b.reflux),
        };
        if better {
            best = Some(SweepOptimum {
                index,
                reflux: point.reflux,
                total_cost: cost,
                theoretical_stages: evaluated.design.stages.theoretical_stages,
                actual_stages: evaluated.design.stages.actual_stages,
            });
        }
    }
    best
}

/// Evaluate every reflux ratio of `sweep` and pick the cheapest design.
///
/// Fails with [`CostError::NoFeasiblePoint`] when no point succeeds. Errors
/// that do not depend on the reflux ratio (plant basis, compositions) fail the
/// whole sweep up front.
pub fn sweep_reflux(inputs: &SweepInputs<'_>, sweep: &RefluxSweep) -> CostResult<SweepResult> {
    sweep.validate()?;
    let spec = &inputs.spec;
    let flows = ProcessFlows::from_production(inputs.basis, spec.xf, spec.xd, spec.xb)?;

    info!(
        start = sweep.start,
        end = sweep.end,
        num_points = sweep.num_points,
        "Starting reflux sweep"
    );

    let points: Vec<SweepPoint> = sweep
        .points()
        .into_par_iter()
        .map(|reflux| SweepPoint {
            reflux,
            outcome: evaluate_point(inputs, &flows, reflux),
        })
        .collect();

    let mut num_failed = 0;
    for point in &points {
        match &point.outcome {
            Ok(evaluated) => debug!(
                reflux = point.reflux,
                stages = evaluated.design.stages.actual_stages,
                cost = evaluated.total_cost(),
                "Evaluated sweep point"
            ),
            Err(e) => {
                num_failed += 1;
                warn!(reflux = point.reflux, error = %e, "Sweep point failed");
            }
        }
    }

    let optimum = select_optimum(&points).ok_or(CostError::NoFeasiblePoint {
        attempted: points.len(),
    })?;
    info!(
        reflux = optimum.reflux,
        cost = optimum.total_cost,
        stages = optimum.actual_stages,
        failed = num_failed,
        "Reflux sweep complete"
    );

    Ok(SweepResult {
        flows,
        num_successful: points.len() - num_failed,
        num_failed,
        points,
        optimum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_column::{ColumnError, OperatingLines, StageResult, solve_operating_lines, solve_q_line};

    fn breakdown(total: f64) -> CostBreakdown {
        CostBreakdown {
            trays: 10,
            tray_cost: 0.0,
            shell_cost: 0.0,
            feed_preheat_cost: 0.0,
            reboiler_cost: 0.0,
            condenser_cost: 0.0,
            steam_cost: 0.0,
            cooling_water_cost: 0.0,
            feed_cost: 0.0,
            reboiler_duty: 0.0,
            condenser_duty: 0.0,
            preheat_duty: 0.0,
            capital_cost_per_unit: total,
            operating_cost_per_unit: 0.0,
            total_break_even_cost: total,
        }
    }

    fn lines() -> OperatingLines {
        let q_line = solve_q_line(1.5, 0.5).unwrap();
        solve_operating_lines(3.0, q_line, 0.9, 0.1).unwrap()
    }

    fn feasible(reflux: f64, total: f64, stages: usize) -> SweepPoint {
        let spec = ProcessSpec {
            xf: 0.5,
            xd: 0.9,
            xb: 0.1,
            reflux,
            q: 1.5,
        };
        SweepPoint {
            reflux,
            outcome: Ok(EvaluatedPoint {
                design: ColumnDesign {
                    spec,
                    lines: lines(),
                    stages: StageResult {
                        theoretical_stages: stages,
                        actual_stages: stages,
                        bottoms_x: 0.05,
                        bottoms_temperature: None,
                        staircase: Vec::new(),
                    },
                },
                costs: breakdown(total),
            }),
        }
    }

    fn failed(reflux: f64) -> SweepPoint {
        SweepPoint {
            reflux,
            outcome: Err(CostError::Column(ColumnError::NonConvergence {
                max_stages: 100,
                last_x: 0.3,
            })),
        }
    }

    #[test]
    fn optimum_skips_failures() {
        let points = vec![failed(1.0), feasible(2.0, 300.0, 12), feasible(3.0, 280.0, 10)];
        let best = select_optimum(&points).unwrap();
        assert_eq!(best.index, 2);
        assert_eq!(best.reflux, 3.0);
        assert_eq!(best.actual_stages, 10);
    }

    #[test]
    fn ties_resolve_to_lowest_reflux() {
        let points = vec![
            feasible(2.0, 300.0, 12),
            feasible(3.0, 250.0, 10),
            feasible(4.0, 250.0, 9),
        ];
        assert_eq!(select_optimum(&points).unwrap().reflux, 3.0);

        let reversed: Vec<SweepPoint> = points.into_iter().rev().collect();
        assert_eq!(select_optimum(&reversed).unwrap().reflux, 3.0);
    }

    #[test]
    fn all_failures_have_no_optimum() {
        assert!(select_optimum(&[failed(0.5), failed(1.0)]).is_none());
    }

    #[test]
    fn sweep_bounds_are_validated() {
        assert!(RefluxSweep::new(2.8, 10.0, 100).is_ok());
        assert!(RefluxSweep::new(10.0, 2.8, 100).is_err());
        assert!(RefluxSweep::new(0.0, 2.8, 100).is_err());
        assert!(RefluxSweep::new(2.8, 10.0, 1).is_err());
        assert!(RefluxSweep::new(f64::NAN, 10.0, 10).is_err());
    }

    #[test]
    fn sweep_points_include_both_ends() {
        let points = RefluxSweep::default().points();
        assert_eq!(points.len(), 100);
        assert_eq!(points[0], 2.8);
        assert_eq!(points[99], 10.0);
    }
}
