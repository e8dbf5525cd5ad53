use clap::{Parser, Subcommand, ValueEnum};
use mt_app::{
    AppResult, CaseParams, DesignReport, SweepReport, case_service, curve_csv, lines_csv,
    pipeline, staircase_csv, vle_loader,
};
use mt_core::units::to_kelvin;
use mt_vle::EquilibriumPoint;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mt-cli")]
#[command(about = "McCabe CLI - binary distillation column sizing and reflux optimisation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate case file syntax and process specification
    Validate {
        /// Path to the case YAML file
        case_path: PathBuf,
    },
    /// Count stages and price the column at one reflux ratio
    Stages {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Reflux ratio (defaults to the case's)
        #[arg(long)]
        reflux: Option<f64>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sweep the reflux ratio for the minimum break-even cost
    Sweep {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Write per-point data as CSV to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export numeric plot data as CSV
    ExportCurve {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Which data set to export
        #[arg(long, value_enum, default_value_t = ExportKind::Curve)]
        kind: ExportKind,
        /// Reflux ratio for lines and staircase (defaults to the case's)
        #[arg(long)]
        reflux: Option<f64>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportKind {
    /// Dense equilibrium curve
    Curve,
    /// q-line, enriching and stripping line segments
    Lines,
    /// Stage staircase vertices
    Staircase,
}

fn main() -> AppResult<()> {
    // Logs go to stderr so CSV on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Stages {
            case_path,
            reflux,
            json,
        } => cmd_stages(&case_path, reflux, json),
        Commands::Sweep {
            case_path,
            json,
            output,
        } => cmd_sweep(&case_path, json, output.as_deref()),
        Commands::ExportCurve {
            case_path,
            kind,
            reflux,
            output,
        } => cmd_export_curve(&case_path, kind, reflux, output.as_deref()),
    }
}

/// Load and validate a case plus its equilibrium samples.
fn load(case_path: &Path, reflux: Option<f64>) -> AppResult<(CaseParams, Vec<EquilibriumPoint>)> {
    let case = case_service::load_case(case_path)?;
    let mut params = case_service::validate_case(&case)?;
    if let Some(r) = reflux {
        params.spec = params.spec.with_reflux(r);
    }
    let vle_path = case_service::vle_path(&case, case_path);
    let samples = vle_loader::load_vle_csv(&vle_path)?;
    info!(case = %params.name, samples = samples.len(), "Case loaded");
    Ok((params, samples))
}

fn write_output(csv: &str, rows: usize, output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} rows to {}", rows, path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let (params, samples) = load(case_path, None)?;
    println!("✓ Case is valid: {}", params.name);
    println!(
        "  xF = {:.6}, xD = {:.6}, xB = {:.6}, q = {:.6}, R = {}",
        params.spec.xf, params.spec.xd, params.spec.xb, params.spec.q, params.spec.reflux
    );
    println!("  {} equilibrium samples", samples.len());
    Ok(())
}

fn cmd_stages(case_path: &Path, reflux: Option<f64>, json: bool) -> AppResult<()> {
    let (params, samples) = load(case_path, reflux)?;
    let evaluation = pipeline::evaluate_case(&samples, &params)?;
    let report = DesignReport::with_costs(&params.name, &evaluation);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let stages = &evaluation.design.stages;
    println!("Case: {}", params.name);
    println!("  Reflux ratio:        {}", report.reflux);
    println!(
        "  Feed line meets enriching line at ({:.5}, {:.5})",
        report.intersection.0, report.intersection.1
    );
    println!("  Theoretical stages:  {}", stages.theoretical_stages);
    println!(
        "  Actual stages:       {} (efficiency {})",
        stages.actual_stages, params.tray_efficiency
    );
    print!("  Bottoms x:           {:.5}", stages.bottoms_x);
    match stages.bottoms_temperature {
        Some(t) => println!(" at {:.2} K", to_kelvin(t)),
        None => println!(),
    }

    let costs = &evaluation.costs;
    println!("\nCosts ($ per 1000 lb distillate):");
    println!("  Capital:    {:.3}", costs.capital_cost_per_unit);
    println!("  Operating:  {:.3}", costs.operating_cost_per_unit);
    println!("  Break-even: {:.3}", costs.total_break_even_cost);
    Ok(())
}

fn cmd_sweep(case_path: &Path, json: bool, output: Option<&Path>) -> AppResult<()> {
    let (params, samples) = load(case_path, None)?;
    let optimization = pipeline::optimize_reflux(&samples, &params)?;
    let report = SweepReport::new(&params.name, &optimization.sweep);

    if let Some(path) = output {
        write_output(&report.to_csv(), report.points.len(), Some(path))?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Reflux sweep over [{}, {}] ({} points, {} failed)",
        params.sweep.start, params.sweep.end, params.sweep.num_points, report.num_failed
    );
    println!("  Optimal reflux ratio: {:.4}", report.optimal_reflux);
    println!("  Minimum break-even:   {:.3} $/1000 lb", report.min_total_cost);
    println!(
        "  Stages at optimum:    {} theoretical, {} actual",
        report.theoretical_stages_at_optimum, report.actual_stages_at_optimum
    );
    Ok(())
}

fn cmd_export_curve(
    case_path: &Path,
    kind: ExportKind,
    reflux: Option<f64>,
    output: Option<&Path>,
) -> AppResult<()> {
    let (params, samples) = load(case_path, reflux)?;

    let csv = match kind {
        ExportKind::Curve => curve_csv(&pipeline::fit_curve(&samples, params.fit)?),
        ExportKind::Lines | ExportKind::Staircase => {
            let options = pipeline::DesignOptions::from(&params);
            let design = pipeline::design_column(&samples, &params.spec, &options)?;
            match kind {
                ExportKind::Lines => lines_csv(&design),
                _ => staircase_csv(&design),
            }
        }
    };

    let rows = csv.lines().count().saturating_sub(1);
    write_output(&csv, rows, output)
}
