//! Design case file schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    #[serde(default = "default_version")]
    pub version: u32,
    pub name: String,
    pub vle: VleSourceDef,
    #[serde(default)]
    pub fit: FitDef,
    pub compositions: CompositionsDef,
    pub feed_condition: FeedConditionDef,
    pub reflux_ratio: f64,
    #[serde(default = "default_tray_efficiency")]
    pub tray_efficiency: f64,
    #[serde(default = "default_max_stages")]
    pub max_stages: usize,
    #[serde(default)]
    pub plant: PlantDef,
    #[serde(default)]
    pub economics: EconomicsDef,
    #[serde(default)]
    pub sweep: SweepDef,
}

fn default_version() -> u32 {
    LATEST_VERSION
}

fn default_tray_efficiency() -> f64 {
    mt_column::DEFAULT_TRAY_EFFICIENCY
}

fn default_max_stages() -> usize {
    100
}

/// Equilibrium samples as a CSV file of `x,y[,t_k]` rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VleSourceDef {
    /// Relative paths resolve against the case file's directory
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FitDef {
    pub degree: usize,
    pub resolution: usize,
}

impl Default for FitDef {
    fn default() -> Self {
        Self {
            degree: 10,
            resolution: 5000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompositionBasis {
    #[default]
    Mole,
    Volume,
    Mass,
}

/// Light component fraction of one stream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CompositionDef {
    pub fraction: f64,
    #[serde(default)]
    pub basis: CompositionBasis,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CompositionsDef {
    pub feed: CompositionDef,
    pub distillate: CompositionDef,
    pub bottoms: CompositionDef,
}

/// Feed thermal condition: q given directly, or from the feed temperature
/// and bubble point with the plant's heat capacities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum FeedConditionDef {
    Quality { q: f64 },
    Thermal { bubble_point_f: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub name: String,
    /// lbm/lbmol
    pub molecular_weight: f64,
    /// Liquid density, lbm/ft^3
    pub density: f64,
    /// Liquid molar heat capacity, BTU/(lbmol F)
    pub heat_capacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantDef {
    pub light: ComponentDef,
    pub heavy: ComponentDef,
    /// BTU/lbmol
    pub heat_of_vaporization: f64,
    pub feed_temperature_f: f64,
    pub distillate_lb_per_day: f64,
    /// Used when the equilibrium data has no temperature column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottoms_temperature_f: Option<f64>,
}

impl Default for PlantDef {
    fn default() -> Self {
        Self {
            light: ComponentDef {
                name: "ethanol".to_string(),
                molecular_weight: 46.07,
                density: 49.59,
                heat_capacity: 0.548 * 46.07,
            },
            heavy: ComponentDef {
                name: "water".to_string(),
                molecular_weight: 18.02,
                density: 62.16,
                heat_capacity: 18.02,
            },
            heat_of_vaporization: 17_000.0,
            feed_temperature_f: 140.0,
            distillate_lb_per_day: 48_000.0,
            bottoms_temperature_f: None,
        }
    }
}

/// Overrides of the canonical cost constants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EconomicsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_years: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_days_per_year: Option<f64>,
    /// $/lbm steam
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_price: Option<f64>,
    /// $/lbm cooling water
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_water_price: Option<f64>,
    /// $/lbm feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_price: Option<f64>,
    /// Current cost index for heat exchangers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_index: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SweepDef {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
}

impl Default for SweepDef {
    fn default() -> Self {
        Self {
            start: 2.8,
            end: 10.0,
            num_points: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_case_takes_defaults() {
        let yaml = r#"
name: minimal
vle:
  path: data.csv
compositions:
  feed: { fraction: 0.3 }
  distillate: { fraction: 0.95, basis: volume }
  bottoms: { fraction: 0.03, basis: mass }
feed_condition:
  type: Quality
  q: 1.2
reflux_ratio: 3.0
"#;
        let case: Case = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(case.version, LATEST_VERSION);
        assert_eq!(case.fit, FitDef::default());
        assert_eq!(case.tray_efficiency, 0.671);
        assert_eq!(case.max_stages, 100);
        assert_eq!(case.compositions.feed.basis, CompositionBasis::Mole);
        assert_eq!(case.compositions.distillate.basis, CompositionBasis::Volume);
        assert_eq!(case.plant, PlantDef::default());
        assert_eq!(case.sweep, SweepDef::default());
        assert_eq!(case.feed_condition, FeedConditionDef::Quality { q: 1.2 });
    }

    #[test]
    fn thermal_feed_condition() {
        let def: FeedConditionDef =
            serde_yaml::from_str("type: Thermal\nbubble_point_f: 197.3\n").unwrap();
        assert_eq!(
            def,
            FeedConditionDef::Thermal {
                bubble_point_f: 197.3
            }
        );
    }
}
