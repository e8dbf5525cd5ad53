//! Reflux sweep on the bundled ethanol-water equilibrium data.

use mt_column::{ProcessSpec, StageConfig};
use mt_cost::{
    CostConstants, CostError, PlantBasis, RefluxSweep, SweepInputs, evaluate_point, sweep_reflux,
};
use mt_vle::{EquilibriumCurve, EquilibriumPoint, FitOptions, fit};

const ETHANOL_WATER: &str = include_str!("../../../data/ethanol_water.csv");

fn ethanol_water_curve() -> EquilibriumCurve {
    let points: Vec<EquilibriumPoint> = ETHANOL_WATER
        .lines()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            let cols: Vec<f64> = l.split(',').map(|c| c.trim().parse().unwrap()).collect();
            EquilibriumPoint::with_temperature(cols[0], cols[1], cols[2])
        })
        .collect();
    fit(&points, FitOptions::default()).unwrap()
}

fn reference_spec() -> ProcessSpec {
    ProcessSpec {
        xf: 0.044504,
        xd: 0.855676706,
        xb: 0.0119526405,
        reflux: 3.0,
        q: 1.0618231177199156,
    }
}

#[test]
fn golden_sweep_finds_interior_minimum() {
    let curve = ethanol_water_curve();
    let basis = PlantBasis::ethanol_water();
    let constants = CostConstants::default();
    let inputs = SweepInputs {
        curve: &curve,
        spec: reference_spec(),
        basis: &basis,
        constants: &constants,
        tray_efficiency: 0.671,
        stage_config: StageConfig::default(),
    };

    let result = sweep_reflux(&inputs, &RefluxSweep::default()).unwrap();

    assert_eq!(result.points.len(), 100);
    assert_eq!(result.num_failed, 0);
    assert_eq!(result.num_successful, 100);

    let refluxes = result.reflux_values();
    assert!(refluxes.windows(2).all(|w| w[0] < w[1]), "input order kept");

    let opt = result.optimum;
    assert!(opt.total_cost.is_finite());
    assert!(opt.reflux >= 2.8 && opt.reflux <= 10.0);
    assert!(opt.reflux < 3.5, "optimum near the low end, got R = {}", opt.reflux);
    assert!(
        opt.total_cost > 255.0 && opt.total_cost < 275.0,
        "break-even cost {}",
        opt.total_cost
    );
    assert!(opt.actual_stages >= opt.theoretical_stages);

    // No feasible point is cheaper than the reported optimum
    for cost in result.total_costs().into_iter().flatten() {
        assert!(cost >= opt.total_cost);
    }

    // Stage counts fall as reflux grows
    let stages: Vec<usize> = result.actual_stages().into_iter().flatten().collect();
    assert!(stages.first().unwrap() >= stages.last().unwrap());
    assert_eq!(
        result.optimal_point().unwrap().design.stages.actual_stages,
        opt.actual_stages
    );
}

#[test]
fn single_point_matches_sweep_point() {
    let curve = ethanol_water_curve();
    let basis = PlantBasis::ethanol_water();
    let constants = CostConstants::default();
    let inputs = SweepInputs {
        curve: &curve,
        spec: reference_spec(),
        basis: &basis,
        constants: &constants,
        tray_efficiency: 0.671,
        stage_config: StageConfig::default(),
    };
    let sweep = RefluxSweep::new(2.8, 10.0, 5).unwrap();
    let result = sweep_reflux(&inputs, &sweep).unwrap();

    let single = evaluate_point(&inputs, &result.flows, 2.8).unwrap();
    let first = result.points[0].outcome.as_ref().unwrap();
    assert_eq!(&single, first);
}

#[test]
fn pinched_range_has_no_feasible_point() {
    let curve = ethanol_water_curve();
    let basis = PlantBasis::ethanol_water();
    let constants = CostConstants::default();
    let inputs = SweepInputs {
        curve: &curve,
        spec: reference_spec(),
        basis: &basis,
        constants: &constants,
        tray_efficiency: 0.671,
        stage_config: StageConfig::default(),
    };
    let err = sweep_reflux(&inputs, &RefluxSweep::new(0.5, 1.5, 5).unwrap()).unwrap_err();
    assert_eq!(err, CostError::NoFeasiblePoint { attempted: 5 });
}
