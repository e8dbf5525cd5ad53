//! Case loading, saving and resolution into solver inputs.

use std::path::{Path, PathBuf};

use mt_column::{ProcessSpec, StageConfig, thermal_quality};
use mt_core::units::degf;
use mt_cost::{CostConstants, PlantBasis, RefluxSweep};
use mt_vle::{ComponentProps, FitOptions, mass_to_mole_fraction, volume_to_mole_fraction};

use crate::error::{AppError, AppResult, ErrorKind, PipelineError, PipelineStage};
use crate::schema::{
    Case, ComponentDef, CompositionBasis, CompositionDef, EconomicsDef, FeedConditionDef,
    LATEST_VERSION, PlantDef,
};

/// A case with every composition in mole fractions and every default
/// applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseParams {
    pub name: String,
    pub fit: FitOptions,
    pub spec: ProcessSpec,
    pub tray_efficiency: f64,
    pub stage_config: StageConfig,
    pub basis: PlantBasis,
    pub constants: CostConstants,
    pub sweep: RefluxSweep,
}

/// Load a case from a YAML file.
pub fn load_case(path: &Path) -> AppResult<Case> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::CaseFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let case: Case = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Case(format!("Failed to parse case YAML: {}", e)))?;

    Ok(case)
}

/// Save a case to a YAML file.
pub fn save_case(path: &Path, case: &Case) -> AppResult<()> {
    let content = serde_yaml::to_string(case)
        .map_err(|e| AppError::Case(format!("Failed to serialize case: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::CaseFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Path of the equilibrium data, relative paths taken from the case file's
/// directory.
pub fn vle_path(case: &Case, case_path: &Path) -> PathBuf {
    if case.vle.path.is_absolute() {
        return case.vle.path.clone();
    }
    case_path
        .parent()
        .map(|dir| dir.join(&case.vle.path))
        .unwrap_or_else(|| case.vle.path.clone())
}

/// Validate a case and resolve it into solver inputs.
pub fn validate_case(case: &Case) -> AppResult<CaseParams> {
    if case.version > LATEST_VERSION {
        return Err(AppError::Validation(format!(
            "Unsupported case version {} (latest is {})",
            case.version, LATEST_VERSION
        )));
    }
    if case.name.trim().is_empty() {
        return Err(AppError::Validation("Case name must not be empty".to_string()));
    }
    Ok(resolve_case(case)?)
}

fn invalid(kind: ErrorKind, message: impl Into<String>) -> PipelineError {
    PipelineError::new(PipelineStage::Validate, kind, message)
}

fn component_props(def: &ComponentDef) -> ComponentProps {
    ComponentProps {
        molecular_weight: def.molecular_weight,
        density: def.density,
    }
}

fn plant_basis(def: &PlantDef) -> PlantBasis {
    PlantBasis {
        light: component_props(&def.light),
        heavy: component_props(&def.heavy),
        light_heat_capacity: def.light.heat_capacity,
        heavy_heat_capacity: def.heavy.heat_capacity,
        heat_of_vaporization: def.heat_of_vaporization,
        feed_temperature: degf(def.feed_temperature_f),
        distillate_mass_rate: def.distillate_lb_per_day,
        bottoms_temperature: def.bottoms_temperature_f.map(degf),
    }
}

fn cost_constants(def: &EconomicsDef) -> CostConstants {
    let mut c = CostConstants::default();
    if let Some(v) = def.horizon_years {
        c.horizon_years = v;
    }
    if let Some(v) = def.operating_days_per_year {
        c.operating_days_per_year = v;
    }
    if let Some(v) = def.steam_price {
        c.steam_price = v;
    }
    if let Some(v) = def.cooling_water_price {
        c.cooling_water_price = v;
    }
    if let Some(v) = def.feed_price {
        c.feed_price = v;
    }
    if let Some(v) = def.cost_index {
        c.cost_index_current = v;
    }
    c
}

fn mole_fraction(
    def: &CompositionDef,
    stream: &str,
    basis: &PlantBasis,
) -> Result<f64, PipelineError> {
    let converted = match def.basis {
        CompositionBasis::Mole => mt_core::numeric::ensure_fraction(def.fraction, "mole fraction")
            .map_err(mt_vle::VleError::from),
        CompositionBasis::Volume => {
            volume_to_mole_fraction(def.fraction, basis.light, basis.heavy)
        }
        CompositionBasis::Mass => mass_to_mole_fraction(
            def.fraction,
            basis.light.molecular_weight,
            basis.heavy.molecular_weight,
        ),
    };
    converted.map_err(|e| {
        PipelineError::new(
            PipelineStage::Validate,
            ErrorKind::from(&e),
            format!("{stream} composition: {e}"),
        )
    })
}

/// Resolve a case into solver inputs, failing in the `Validate` stage.
pub fn resolve_case(case: &Case) -> Result<CaseParams, PipelineError> {
    let basis = plant_basis(&case.plant);
    basis
        .validate()
        .map_err(|e| PipelineError::cost(PipelineStage::Validate, &e))?;

    let xf = mole_fraction(&case.compositions.feed, "feed", &basis)?;
    let xd = mole_fraction(&case.compositions.distillate, "distillate", &basis)?;
    let xb = mole_fraction(&case.compositions.bottoms, "bottoms", &basis)?;

    let q = match case.feed_condition {
        FeedConditionDef::Quality { q } => q,
        FeedConditionDef::Thermal { bubble_point_f } => thermal_quality(
            case.plant.feed_temperature_f,
            bubble_point_f,
            basis.mixture_heat_capacity(xf),
            basis.heat_of_vaporization,
        )
        .map_err(|e| PipelineError::column(PipelineStage::Validate, &e))?,
    };

    let spec = ProcessSpec {
        xf,
        xd,
        xb,
        reflux: case.reflux_ratio,
        q,
    };
    spec.validate()
        .map_err(|e| PipelineError::column(PipelineStage::Validate, &e))?;

    if !(case.tray_efficiency > 0.0 && case.tray_efficiency <= 1.0) {
        return Err(invalid(
            ErrorKind::InvalidArgument,
            format!("tray efficiency must be in (0, 1], got {}", case.tray_efficiency),
        ));
    }
    if case.max_stages == 0 {
        return Err(invalid(ErrorKind::InvalidArgument, "max_stages must be positive"));
    }
    if case.fit.resolution < 2 {
        return Err(invalid(
            ErrorKind::InvalidArgument,
            format!("fit resolution must be at least 2, got {}", case.fit.resolution),
        ));
    }

    let sweep = RefluxSweep::new(case.sweep.start, case.sweep.end, case.sweep.num_points)
        .map_err(|e| PipelineError::cost(PipelineStage::Validate, &e))?;

    Ok(CaseParams {
        name: case.name.clone(),
        fit: FitOptions {
            degree: case.fit.degree,
            resolution: case.fit.resolution,
        },
        spec,
        tray_efficiency: case.tray_efficiency,
        stage_config: StageConfig {
            max_stages: case.max_stages,
        },
        basis,
        constants: cost_constants(&case.economics),
        sweep,
    })
}
