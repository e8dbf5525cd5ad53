//! Equipment and utility price correlations.
//!
//! Flows in lbmol/hr, duties in BTU/hr, temperatures in deg F, molar heat
//! capacities in BTU/(lbmol F). Utility and feed costs cover the whole
//! operating horizon of [`CostConstants`].

use crate::constants::{CostConstants, MID_RANGE_TRAYS};
use crate::error::{CostError, CostResult};
use mt_core::numeric::{ensure_finite, ensure_positive};

/// Heat exchanger sizing and price.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExchangerCost {
    /// BTU/hr
    pub duty: f64,
    /// ft^2
    pub area: f64,
    /// $
    pub cost: f64,
}

/// Feed preheater price plus the vapor it condenses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PreheatCost {
    pub exchanger: ExchangerCost,
    /// Overhead vapor condensed by heating the feed, lbmol/hr
    pub condensed: f64,
}

/// Installed sieve tray cost for `trays` real trays.
pub fn tray_cost(c: &CostConstants, trays: usize) -> f64 {
    let (lo, hi) = MID_RANGE_TRAYS;
    let price = if trays > lo && trays < hi {
        c.tray_price_mid_range
    } else {
        c.tray_price_base
    };
    c.tray_material_factor * price * (trays as f64 + c.mist_eliminator_trays)
}

/// Column shell cost for `trays` real trays.
pub fn shell_cost(c: &CostConstants, trays: usize) -> f64 {
    c.shell_price * (c.shell_height_per_tray * trays as f64).powf(c.shell_exponent)
}

/// Feed preheater heating the feed from the threshold temperature to
/// `feed_temperature_f` against condensing overhead vapor.
///
/// A feed at or below the threshold needs no preheater.
pub fn feed_preheat(
    c: &CostConstants,
    feed_temperature_f: f64,
    feed_flow: f64,
    zf: f64,
    cp_a: f64,
    cp_b: f64,
    h_vap: f64,
) -> CostResult<PreheatCost> {
    ensure_finite(feed_temperature_f, "feed temperature")?;
    if feed_temperature_f <= c.preheat_threshold_f {
        return Ok(PreheatCost::default());
    }
    if feed_temperature_f >= c.preheat_medium_f {
        return Err(CostError::InvalidArg {
            what: format!(
                "feed temperature {feed_temperature_f} F is not below the heating medium at {} F",
                c.preheat_medium_f
            ),
        });
    }
    ensure_positive(feed_flow, "feed flow")?;
    ensure_positive(h_vap, "heat of vaporization")?;

    let cp_mix = cp_a * zf + cp_b * (1.0 - zf);
    let duty = feed_flow * cp_mix * (feed_temperature_f - c.preheat_threshold_f);
    let dt_hot = c.preheat_medium_f - feed_temperature_f;
    let dt_cold = c.preheat_medium_f - c.preheat_threshold_f;
    let lmtd = (dt_hot - dt_cold) / (dt_hot / dt_cold).ln();
    let area = duty / (c.exchanger_u * lmtd);

    Ok(PreheatCost {
        exchanger: ExchangerCost {
            duty,
            area,
            cost: c.exchanger_price(area),
        },
        condensed: duty / h_vap,
    })
}

/// Reboiler boiling up G' = (q - 1) F + D (R + 1) against steam.
pub fn reboiler(
    c: &CostConstants,
    distillate: f64,
    feed_flow: f64,
    reflux: f64,
    q: f64,
    h_vap: f64,
    bottoms_temperature_f: f64,
) -> CostResult<ExchangerCost> {
    ensure_finite(bottoms_temperature_f, "bottoms temperature")?;
    ensure_positive(h_vap, "heat of vaporization")?;
    let dt = c.reboiler_steam_f - bottoms_temperature_f;
    if dt <= 0.0 {
        return Err(CostError::InvalidArg {
            what: format!(
                "bottoms at {bottoms_temperature_f} F is not below the reboiler steam at {} F",
                c.reboiler_steam_f
            ),
        });
    }

    let boilup = (q - 1.0) * feed_flow + distillate * (reflux + 1.0);
    let duty = ensure_finite(boilup * h_vap, "reboiler duty")?;
    if duty <= 0.0 {
        return Err(CostError::InvalidArg {
            what: format!("reboiler boil-up must be positive, got {boilup} lbmol/hr"),
        });
    }
    let area = duty / (c.exchanger_u * dt);
    Ok(ExchangerCost {
        duty,
        area,
        cost: c.exchanger_price(area),
    })
}

/// Total condenser for the overhead vapor G = D (R + 1), less the vapor
/// already condensed in the feed preheater.
pub fn condenser(
    c: &CostConstants,
    distillate: f64,
    condensed: f64,
    reflux: f64,
    h_vap: f64,
) -> CostResult<ExchangerCost> {
    ensure_positive(h_vap, "heat of vaporization")?;
    let vapor = distillate * (reflux + 1.0) - condensed;
    let duty = ensure_finite(vapor * h_vap, "condenser duty")?;
    if duty <= 0.0 {
        return Err(CostError::InvalidArg {
            what: format!("condenser vapor load must be positive, got {vapor} lbmol/hr"),
        });
    }
    let area = duty / (c.condenser_u * c.condenser_mean_dt_f);
    Ok(ExchangerCost {
        duty,
        area,
        cost: c.exchanger_price(area),
    })
}

/// Steam for `reboiler_duty` BTU/hr over the horizon.
pub fn steam_cost(c: &CostConstants, reboiler_duty: f64) -> f64 {
    reboiler_duty * c.horizon_hours() / c.steam_latent_heat * c.steam_price
}

/// Cooling water for `condenser_duty` BTU/hr over the horizon.
pub fn cooling_water_cost(c: &CostConstants, condenser_duty: f64) -> f64 {
    condenser_duty * c.horizon_hours() / c.cooling_water_rise_f * c.cooling_water_price
}

/// Raw feed purchased over the horizon.
pub fn feed_cost(c: &CostConstants, feed_flow: f64, zf: f64, mw_a: f64, mw_b: f64) -> f64 {
    let mass_rate = feed_flow * (zf * mw_a + (1.0 - zf) * mw_b);
    mass_rate * c.horizon_hours() * c.feed_price
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: f64 = 47.59442135513851;
    const F: f64 = 1233.6369140243585;
    const ZF: f64 = 0.044504;
    const Q: f64 = 1.0618231177199156;
    const H_VAP: f64 = 17000.0;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
    }

    #[test]
    fn tray_price_boundaries() {
        let c = CostConstants::default();
        assert!(close(tray_cost(&c, 9), 37370.7093192));
        assert!(close(tray_cost(&c, 10), 61756.6999788));
        assert!(close(tray_cost(&c, 19), 113062.4239788));
        assert!(close(tray_cost(&c, 20), 79175.3733192));
    }

    #[test]
    fn shell_price() {
        let c = CostConstants::default();
        assert!(close(shell_cost(&c, 29), 470354.249084175));
        assert_eq!(shell_cost(&c, 0), 0.0);
    }

    #[test]
    fn preheater_for_warm_feed() {
        let c = CostConstants::default();
        let p = feed_preheat(&c, 140.0, F, ZF, 0.548 * 46.07, 18.02, H_VAP).unwrap();
        assert!(close(p.exchanger.duty, 1221851.3686684));
        assert!(close(p.condensed, 71.8736099216708));
        assert!(close(p.exchanger.cost, 36189.738558111));
    }

    #[test]
    fn cold_feed_needs_no_preheater() {
        let c = CostConstants::default();
        let p = feed_preheat(&c, 86.0, F, ZF, 25.0, 18.02, H_VAP).unwrap();
        assert_eq!(p, PreheatCost::default());
    }

    #[test]
    fn feed_hotter_than_medium_is_rejected() {
        let c = CostConstants::default();
        assert!(feed_preheat(&c, 180.0, F, ZF, 25.0, 18.02, H_VAP).is_err());
    }

    #[test]
    fn reboiler_against_steam() {
        let c = CostConstants::default();
        let t_f = 372.0 * 9.0 / 5.0 - 459.67;
        let r = reboiler(&c, D, F, 3.0, Q, H_VAP, t_f).unwrap();
        assert!(close(r.duty, 4532964.41485856));
        assert!((r.cost - 44136.9131215605).abs() < 1e-6);
    }

    #[test]
    fn reboiler_rejects_hot_bottoms() {
        let c = CostConstants::default();
        let err = reboiler(&c, D, F, 3.0, Q, H_VAP, 400.0).unwrap_err();
        assert!(matches!(err, CostError::InvalidArg { .. }));
    }

    #[test]
    fn condenser_net_of_preheat() {
        let c = CostConstants::default();
        let r = condenser(&c, D, 71.8736099216708, 3.0, H_VAP).unwrap();
        assert!(close(r.duty, 2014569.28348102));
        assert!((r.cost - 79376.6576572681).abs() < 1e-6);
    }

    #[test]
    fn utilities_and_feed() {
        let c = CostConstants::default();
        assert!(close(steam_cost(&c, 1e6), 151033.1084152012));
        assert!(close(cooling_water_cost(&c, 1e6), 8886.857142857143));
        assert!(close(feed_cost(&c, 100.0, 0.5, 46.07, 18.02), 1661212.8));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn condenser_cost_grows_with_reflux(
            distillate in 1.0_f64..500.0,
            r_lo in 0.1_f64..20.0,
            dr in 0.01_f64..10.0,
        ) {
            let c = CostConstants::default();
            let lo = condenser(&c, distillate, 0.0, r_lo, 17_000.0).unwrap();
            let hi = condenser(&c, distillate, 0.0, r_lo + dr, 17_000.0).unwrap();
            prop_assert!(hi.duty > lo.duty);
            prop_assert!(hi.cost > lo.cost);
        }

        #[test]
        fn tray_cost_grows_inside_each_band(trays in 0usize..200) {
            let c = CostConstants::default();
            let (lo, hi) = MID_RANGE_TRAYS;
            let same_band = (trays > lo && trays + 1 < hi) || trays + 1 <= lo || trays >= hi;
            if same_band {
                prop_assert!(tray_cost(&c, trays + 1) > tray_cost(&c, trays));
            }
            prop_assert!(shell_cost(&c, trays + 1) > shell_cost(&c, trays));
        }
    }
}
