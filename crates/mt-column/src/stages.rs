//! McCabe-Thiele stage stepping.

use crate::error::{ColumnError, ColumnResult};
use crate::lines::Line;
use mt_core::units::Temperature;
use mt_vle::EquilibriumCurve;
use tracing::{debug, trace};

/// Stage stepping configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageConfig {
    /// Stage count above which stepping is abandoned
    pub max_stages: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self { max_stages: 100 }
    }
}

/// Outcome of stepping off theoretical stages.
#[derive(Debug, Clone, PartialEq)]
pub struct StageCount {
    /// Number of theoretical stages
    pub stages: usize,
    /// Liquid composition reached on the last stage (below xB)
    pub bottoms_x: f64,
    /// Curve index of the last stage's equilibrium point
    pub bottoms_index: usize,
    /// Staircase vertices starting at (xD, xD), alternating horizontal and
    /// vertical moves
    pub staircase: Vec<(f64, f64)>,
}

/// Step off theoretical stages from the distillate down to the bottoms.
///
/// Starting at (xD, xD) the walk alternates:
/// 1. move horizontally to the first curve point whose vapor fraction reaches
///    the current y; that is one stage,
/// 2. fail once the count exceeds `config.max_stages`, even if this stage
///    reached xB,
/// 3. stop once the liquid fraction drops below xB,
/// 4. move vertically to the lower of the enriching and stripping lines.
pub fn count_stages(
    curve: &EquilibriumCurve,
    xb: f64,
    xd: f64,
    enriching: &Line,
    stripping: &Line,
    config: StageConfig,
) -> ColumnResult<StageCount> {
    let mut x_cur = xd;
    let mut y_cur = xd;
    let mut stages = 0;
    let mut staircase = vec![(x_cur, y_cur)];

    loop {
        let index = curve
            .first_reaching(y_cur)
            .ok_or(ColumnError::CurveExhausted {
                stage: stages + 1,
                y_target: y_cur,
            })?;
        let (x_eq, _) = curve.point(index).ok_or(ColumnError::CurveExhausted {
            stage: stages + 1,
            y_target: y_cur,
        })?;
        x_cur = x_eq;
        stages += 1;
        staircase.push((x_cur, y_cur));
        trace!(stage = stages, x = x_cur, y = y_cur, "stepped to equilibrium");

        if stages > config.max_stages {
            debug!(stages, x = x_cur, "stage stepping did not converge");
            return Err(ColumnError::NonConvergence {
                max_stages: config.max_stages,
                last_x: x_cur,
            });
        }

        if x_cur < xb {
            debug!(stages, bottoms_x = x_cur, "reached bottoms composition");
            return Ok(StageCount {
                stages,
                bottoms_x: x_cur,
                bottoms_index: index,
                staircase,
            });
        }

        y_cur = enriching.at(x_cur).min(stripping.at(x_cur));
        staircase.push((x_cur, y_cur));
    }
}

/// Real trays needed for `theoretical` stages at tray `efficiency` in (0, 1].
pub fn actual_stages(theoretical: usize, efficiency: f64) -> ColumnResult<usize> {
    if !(efficiency > 0.0 && efficiency <= 1.0) {
        return Err(ColumnError::InvalidArg {
            what: format!("tray efficiency must be in (0, 1], got {efficiency}"),
        });
    }
    Ok((theoretical as f64 / efficiency).ceil() as usize)
}

/// Stage count corrected for tray efficiency.
#[derive(Debug, Clone, PartialEq)]
pub struct StageResult {
    pub theoretical_stages: usize,
    pub actual_stages: usize,
    /// Liquid composition reached on the last theoretical stage
    pub bottoms_x: f64,
    /// Bubble-point temperature at that composition, when the curve has one
    pub bottoms_temperature: Option<Temperature>,
    pub staircase: Vec<(f64, f64)>,
}

impl StageResult {
    pub fn from_count(
        count: StageCount,
        curve: &EquilibriumCurve,
        efficiency: f64,
    ) -> ColumnResult<Self> {
        let actual = actual_stages(count.stages, efficiency)?;
        Ok(Self {
            theoretical_stages: count.stages,
            actual_stages: actual,
            bottoms_x: count.bottoms_x,
            bottoms_temperature: curve.temperature_at(count.bottoms_index),
            staircase: count.staircase,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn actual_stages_grows_as_efficiency_drops(
            theoretical in 1usize..200,
            e_hi in 0.05_f64..=1.0,
            frac in 0.05_f64..=1.0,
        ) {
            let e_lo = e_hi * frac;
            let hi = actual_stages(theoretical, e_hi).unwrap();
            let lo = actual_stages(theoretical, e_lo).unwrap();
            prop_assert!(lo >= hi);
            prop_assert!(hi >= theoretical);
        }
    }
}
