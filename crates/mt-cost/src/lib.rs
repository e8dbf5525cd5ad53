//! Column cost model and reflux ratio optimization.
//!
//! Prices a McCabe-Thiele design: sieve trays, shell, feed preheater,
//! reboiler and condenser as capital; steam, cooling water and feed as
//! operating cost. Both are expressed per 1000 lbm of distillate over the
//! plant horizon and summed to a break-even cost, which [`sweep_reflux`]
//! minimizes over a range of reflux ratios.

pub mod breakdown;
pub mod constants;
pub mod error;
pub mod flows;
pub mod pricing;
pub mod sweep;

pub use breakdown::{CostBreakdown, evaluate_costs};
pub use constants::{CostConstants, MID_RANGE_TRAYS};
pub use error::{CostError, CostResult};
pub use flows::{PlantBasis, ProcessFlows};
pub use pricing::{
    ExchangerCost, PreheatCost, condenser, cooling_water_cost, feed_cost, feed_preheat, reboiler,
    shell_cost, steam_cost, tray_cost,
};
pub use sweep::{
    EvaluatedPoint, RefluxSweep, SweepInputs, SweepOptimum, SweepPoint, SweepResult,
    evaluate_point, sweep_reflux,
};
