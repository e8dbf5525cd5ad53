//! Economic and physical constants of the cost correlations.
//!
//! Units are US customary: BTU, lbm, lbmol, deg F, ft^2, hours.

/// Trays strictly between these bounds are priced on the mid-range curve.
pub const MID_RANGE_TRAYS: (usize, usize) = (9, 20);

/// Constants used by every pricing function.
///
/// `Default` is the canonical set used for all reported designs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostConstants {
    /// Years of operation the capital is recovered over
    pub horizon_years: f64,
    /// Operating days per year
    pub operating_days_per_year: f64,

    /// Sieve tray price per tray, 10 to 19 trays
    pub tray_price_mid_range: f64,
    /// Sieve tray price per tray, any other count
    pub tray_price_base: f64,
    /// Material factor applied to tray prices
    pub tray_material_factor: f64,
    /// Mist eliminator, in tray-price equivalents
    pub mist_eliminator_trays: f64,

    /// Shell price coefficient
    pub shell_price: f64,
    /// Shell height per tray in the shell correlation
    pub shell_height_per_tray: f64,
    pub shell_exponent: f64,

    /// Current / base cost index for heat exchangers
    pub cost_index_current: f64,
    pub cost_index_base: f64,
    /// Installation factor for heat exchangers
    pub installation_factor: f64,
    /// Reference exchanger price, $
    pub exchanger_base_price: f64,
    /// Reference exchanger area, ft^2
    pub exchanger_base_area: f64,
    pub exchanger_exponent: f64,
    /// Overall heat transfer coefficient, BTU/(hr ft^2 F)
    pub exchanger_u: f64,

    /// Feed at or below this temperature needs no preheater, F
    pub preheat_threshold_f: f64,
    /// Heating medium temperature in the feed preheater, F
    pub preheat_medium_f: f64,
    /// Reboiler steam temperature, F
    pub reboiler_steam_f: f64,
    /// Condenser overall heat transfer coefficient, BTU/(hr ft^2 F)
    pub condenser_u: f64,
    /// Condenser mean temperature difference, F
    pub condenser_mean_dt_f: f64,

    /// Latent heat of reboiler steam, BTU/lbm
    pub steam_latent_heat: f64,
    /// $/lbm steam
    pub steam_price: f64,
    /// Cooling water temperature rise, F (cp taken as 1 BTU/(lbm F))
    pub cooling_water_rise_f: f64,
    /// $/lbm cooling water
    pub cooling_water_price: f64,
    /// $/lbm feed
    pub feed_price: f64,
}

impl Default for CostConstants {
    fn default() -> Self {
        Self {
            horizon_years: 3.0,
            operating_days_per_year: 360.0,

            tray_price_mid_range: 4750.53,
            tray_price_base: 3167.02,
            tray_material_factor: 1.2,
            mist_eliminator_trays: 0.8333,

            shell_price: 39187.47,
            shell_height_per_tray: 0.60,
            shell_exponent: 0.87,

            cost_index_current: 535.5,
            cost_index_base: 355.0,
            installation_factor: 5.0,
            exchanger_base_price: 10_000.0,
            exchanger_base_area: 625.0,
            exchanger_exponent: 0.7,
            exchanger_u: 100.0,

            preheat_threshold_f: 86.0,
            preheat_medium_f: 173.1,
            reboiler_steam_f: 365.86,
            condenser_u: 44.0,
            condenser_mean_dt_f: 68.1,

            steam_latent_heat: 858.09,
            steam_price: 5.0 / 1000.0,
            cooling_water_rise_f: 35.0,
            cooling_water_price: 0.000_012,
            feed_price: 0.020,
        }
    }
}

impl CostConstants {
    /// Escalation and installation multiplier for exchanger prices.
    pub fn exchanger_scaling(&self) -> f64 {
        (self.cost_index_current / self.cost_index_base) * self.installation_factor
    }

    /// Operating hours over the whole horizon.
    pub fn horizon_hours(&self) -> f64 {
        24.0 * self.operating_days_per_year * self.horizon_years
    }

    /// Price of an exchanger with `area` ft^2 on the power-law curve.
    pub fn exchanger_price(&self, area: f64) -> f64 {
        self.exchanger_scaling()
            * self.exchanger_base_price
            * (area / self.exchanger_base_area).powf(self.exchanger_exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_scaling() {
        let c = CostConstants::default();
        assert!((c.exchanger_scaling() - 535.5 / 355.0 * 5.0).abs() < 1e-12);
        assert_eq!(c.horizon_hours(), 25_920.0);
    }

    #[test]
    fn reference_area_costs_base_price() {
        let c = CostConstants::default();
        let price = c.exchanger_price(c.exchanger_base_area);
        assert!((price - c.exchanger_scaling() * 10_000.0).abs() < 1e-9);
    }
}
