//! Break-even cost of one column design.

use crate::constants::CostConstants;
use crate::error::{CostError, CostResult};
use crate::flows::{PlantBasis, ProcessFlows};
use crate::pricing::{
    condenser, cooling_water_cost, feed_cost, feed_preheat, reboiler, shell_cost, steam_cost,
    tray_cost,
};
use mt_column::{ProcessSpec, StageResult};
use mt_core::numeric::ensure_finite;
use mt_core::units::to_fahrenheit;

/// Itemised cost of one design. Item costs in $, duties in BTU/hr, per-unit
/// costs in $ per 1000 lbm of distillate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    /// Real trays priced (actual stages less the reboiler)
    pub trays: usize,
    pub tray_cost: f64,
    pub shell_cost: f64,
    pub feed_preheat_cost: f64,
    pub reboiler_cost: f64,
    pub condenser_cost: f64,
    pub steam_cost: f64,
    pub cooling_water_cost: f64,
    pub feed_cost: f64,
    pub reboiler_duty: f64,
    pub condenser_duty: f64,
    pub preheat_duty: f64,
    pub capital_cost_per_unit: f64,
    pub operating_cost_per_unit: f64,
    pub total_break_even_cost: f64,
}

impl CostBreakdown {
    pub fn capital_cost(&self) -> f64 {
        self.tray_cost
            + self.shell_cost
            + self.feed_preheat_cost
            + self.reboiler_cost
            + self.condenser_cost
    }

    pub fn operating_cost(&self) -> f64 {
        self.steam_cost + self.cooling_water_cost + self.feed_cost
    }
}

/// Price the column described by `spec` and its stage result.
///
/// The bottoms temperature comes from the stage walk when the curve carries
/// temperatures, else from the plant basis.
pub fn evaluate_costs(
    constants: &CostConstants,
    basis: &PlantBasis,
    flows: &ProcessFlows,
    spec: &ProcessSpec,
    stages: &StageResult,
) -> CostResult<CostBreakdown> {
    let bottoms_temperature = stages
        .bottoms_temperature
        .or(basis.bottoms_temperature)
        .ok_or(CostError::MissingBottomsTemperature)?;

    let trays = stages.actual_stages.saturating_sub(1);
    let tray = tray_cost(constants, trays);
    let shell = shell_cost(constants, trays);

    let preheat = feed_preheat(
        constants,
        to_fahrenheit(basis.feed_temperature),
        flows.feed,
        spec.xf,
        basis.light_heat_capacity,
        basis.heavy_heat_capacity,
        basis.heat_of_vaporization,
    )?;
    let reb = reboiler(
        constants,
        flows.distillate,
        flows.feed,
        spec.reflux,
        spec.q,
        basis.heat_of_vaporization,
        to_fahrenheit(bottoms_temperature),
    )?;
    let cond = condenser(
        constants,
        flows.distillate,
        preheat.condensed,
        spec.reflux,
        basis.heat_of_vaporization,
    )?;

    let steam = steam_cost(constants, reb.duty);
    let water = cooling_water_cost(constants, cond.duty);
    let feed = feed_cost(
        constants,
        flows.feed,
        spec.xf,
        basis.light.molecular_weight,
        basis.heavy.molecular_weight,
    );

    let mut breakdown = CostBreakdown {
        trays,
        tray_cost: tray,
        shell_cost: shell,
        feed_preheat_cost: preheat.exchanger.cost,
        reboiler_cost: reb.cost,
        condenser_cost: cond.cost,
        steam_cost: steam,
        cooling_water_cost: water,
        feed_cost: feed,
        reboiler_duty: reb.duty,
        condenser_duty: cond.duty,
        preheat_duty: preheat.exchanger.duty,
        capital_cost_per_unit: 0.0,
        operating_cost_per_unit: 0.0,
        total_break_even_cost: 0.0,
    };

    let divisor = basis.distillate_kilo_lb(constants);
    breakdown.capital_cost_per_unit =
        ensure_finite(breakdown.capital_cost() / divisor, "capital cost")?;
    breakdown.operating_cost_per_unit =
        ensure_finite(breakdown.operating_cost() / divisor, "operating cost")?;
    breakdown.total_break_even_cost =
        breakdown.capital_cost_per_unit + breakdown.operating_cost_per_unit;
    Ok(breakdown)
}
