//! Serializable reports and CSV tables for external plotting.

use mt_column::Line;
use mt_core::units::to_kelvin;
use mt_cost::{CostBreakdown, SweepResult};
use mt_vle::EquilibriumCurve;
use serde::Serialize;

use crate::pipeline::{CaseEvaluation, DesignOutput};

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LineReport {
    pub slope: f64,
    pub intercept: f64,
}

impl From<&Line> for LineReport {
    fn from(line: &Line) -> Self {
        Self {
            slope: line.slope,
            intercept: line.intercept,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CostReport {
    pub trays: usize,
    pub tray_cost: f64,
    pub shell_cost: f64,
    pub feed_preheat_cost: f64,
    pub reboiler_cost: f64,
    pub condenser_cost: f64,
    pub steam_cost: f64,
    pub cooling_water_cost: f64,
    pub feed_cost: f64,
    pub reboiler_duty_btu_hr: f64,
    pub condenser_duty_btu_hr: f64,
    pub capital_cost_per_unit: f64,
    pub operating_cost_per_unit: f64,
    pub total_break_even_cost: f64,
}

impl From<&CostBreakdown> for CostReport {
    fn from(b: &CostBreakdown) -> Self {
        Self {
            trays: b.trays,
            tray_cost: b.tray_cost,
            shell_cost: b.shell_cost,
            feed_preheat_cost: b.feed_preheat_cost,
            reboiler_cost: b.reboiler_cost,
            condenser_cost: b.condenser_cost,
            steam_cost: b.steam_cost,
            cooling_water_cost: b.cooling_water_cost,
            feed_cost: b.feed_cost,
            reboiler_duty_btu_hr: b.reboiler_duty,
            condenser_duty_btu_hr: b.condenser_duty,
            capital_cost_per_unit: b.capital_cost_per_unit,
            operating_cost_per_unit: b.operating_cost_per_unit,
            total_break_even_cost: b.total_break_even_cost,
        }
    }
}

/// One design at one reflux ratio.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DesignReport {
    pub case: String,
    pub xf: f64,
    pub xd: f64,
    pub xb: f64,
    pub reflux: f64,
    pub q: f64,
    pub q_line: LineReport,
    pub enriching: LineReport,
    pub stripping: LineReport,
    pub intersection: (f64, f64),
    pub theoretical_stages: usize,
    pub actual_stages: usize,
    pub bottoms_x: f64,
    pub bottoms_temperature_k: Option<f64>,
    pub staircase: Vec<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costs: Option<CostReport>,
}

impl DesignReport {
    pub fn new(case: &str, design: &DesignOutput) -> Self {
        let spec = &design.spec;
        Self {
            case: case.to_string(),
            xf: spec.xf,
            xd: spec.xd,
            xb: spec.xb,
            reflux: spec.reflux,
            q: spec.q,
            q_line: (&design.q_line).into(),
            enriching: (&design.enriching).into(),
            stripping: (&design.stripping).into(),
            intersection: design.intersection,
            theoretical_stages: design.stages.theoretical_stages,
            actual_stages: design.stages.actual_stages,
            bottoms_x: design.stages.bottoms_x,
            bottoms_temperature_k: design.stages.bottoms_temperature.map(to_kelvin),
            staircase: design.stages.staircase.clone(),
            costs: None,
        }
    }

    pub fn with_costs(case: &str, evaluation: &CaseEvaluation) -> Self {
        Self {
            costs: Some((&evaluation.costs).into()),
            ..Self::new(case, &evaluation.design)
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SweepPointReport {
    pub reflux: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theoretical_stages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_stages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital_cost_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_cost_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SweepReport {
    pub case: String,
    pub optimal_reflux: f64,
    pub min_total_cost: f64,
    pub theoretical_stages_at_optimum: usize,
    pub actual_stages_at_optimum: usize,
    pub num_failed: usize,
    pub points: Vec<SweepPointReport>,
}

impl SweepReport {
    pub fn new(case: &str, result: &SweepResult) -> Self {
        let points = result
            .points
            .iter()
            .map(|p| match &p.outcome {
                Ok(e) => SweepPointReport {
                    reflux: p.reflux,
                    theoretical_stages: Some(e.design.stages.theoretical_stages),
                    actual_stages: Some(e.design.stages.actual_stages),
                    capital_cost_per_unit: Some(e.costs.capital_cost_per_unit),
                    operating_cost_per_unit: Some(e.costs.operating_cost_per_unit),
                    total_cost: Some(e.total_cost()),
                    error: None,
                },
                Err(err) => SweepPointReport {
                    reflux: p.reflux,
                    theoretical_stages: None,
                    actual_stages: None,
                    capital_cost_per_unit: None,
                    operating_cost_per_unit: None,
                    total_cost: None,
                    error: Some(err.to_string()),
                },
            })
            .collect();

        Self {
            case: case.to_string(),
            optimal_reflux: result.optimum.reflux,
            min_total_cost: result.optimum.total_cost,
            theoretical_stages_at_optimum: result.optimum.theoretical_stages,
            actual_stages_at_optimum: result.optimum.actual_stages,
            num_failed: result.num_failed,
            points,
        }
    }

    /// `reflux,theoretical_stages,actual_stages,capital,operating,total`;
    /// failed points leave the numeric columns empty.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(
            "reflux,theoretical_stages,actual_stages,capital_per_unit,operating_per_unit,total_cost\n",
        );
        for p in &self.points {
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                p.reflux,
                opt(p.theoretical_stages),
                opt(p.actual_stages),
                opt(p.capital_cost_per_unit),
                opt(p.operating_cost_per_unit),
                opt(p.total_cost),
            ));
        }
        csv
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Dense curve as `x,y[,t_k]`.
pub fn curve_csv(curve: &EquilibriumCurve) -> String {
    let mut csv = if curve.has_temperatures() {
        String::from("x,y,t_k\n")
    } else {
        String::from("x,y\n")
    };
    let temperatures = curve.temperatures_k();
    for (i, (x, y)) in curve.iter().enumerate() {
        match temperatures.and_then(|t| t.get(i)) {
            Some(t) => csv.push_str(&format!("{},{},{}\n", x, y, t)),
            None => csv.push_str(&format!("{},{}\n", x, y)),
        }
    }
    csv
}

/// Staircase vertices as `x,y`, from (xD, xD) down to the bottoms.
pub fn staircase_csv(design: &DesignOutput) -> String {
    let mut csv = String::from("x,y\n");
    for (x, y) in &design.stages.staircase {
        csv.push_str(&format!("{},{}\n", x, y));
    }
    csv
}

/// Segment end points of the three lines as `line,x,y`.
///
/// The q-line and enriching line run from their anchor to the intersection;
/// the stripping line from (xB, xB) to the intersection.
pub fn lines_csv(design: &DesignOutput) -> String {
    let spec = &design.spec;
    let (ix, iy) = design.intersection;
    let mut csv = String::from("line,x,y\n");
    for (name, x0, y0) in [
        ("q", spec.xf, spec.xf),
        ("enriching", spec.xd, spec.xd),
        ("stripping", spec.xb, spec.xb),
    ] {
        csv.push_str(&format!("{},{},{}\n", name, x0, y0));
        csv.push_str(&format!("{},{},{}\n", name, ix, iy));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_csv_without_temperatures() {
        let curve =
            EquilibriumCurve::from_columns(vec![0.0, 0.5], vec![0.0, 0.7], None).unwrap();
        assert_eq!(curve_csv(&curve), "x,y\n0,0\n0.5,0.7\n");
    }

    #[test]
    fn curve_csv_with_temperatures() {
        let curve = EquilibriumCurve::from_columns(
            vec![0.0, 0.5],
            vec![0.0, 0.7],
            Some(vec![373.15, 355.0]),
        )
        .unwrap();
        assert_eq!(curve_csv(&curve), "x,y,t_k\n0,0,373.15\n0.5,0.7,355\n");
    }

    #[test]
    fn empty_columns_for_failed_points() {
        let report = SweepReport {
            case: "c".to_string(),
            optimal_reflux: 3.0,
            min_total_cost: 260.0,
            theoretical_stages_at_optimum: 20,
            actual_stages_at_optimum: 30,
            num_failed: 1,
            points: vec![SweepPointReport {
                reflux: 1.0,
                theoretical_stages: None,
                actual_stages: None,
                capital_cost_per_unit: None,
                operating_cost_per_unit: None,
                total_cost: None,
                error: Some("no".to_string()),
            }],
        };
        let csv = report.to_csv();
        assert_eq!(csv.lines().nth(1), Some("1,,,,,"));
    }
}
