//! # Carbon CLI
//!
//! Runs a full assessment of a project file: life-cycle stages, compliance
//! scoring against the project's standard, an optional GHG inventory, and
//! material optimization suggestions. Prints a summary followed by the
//! JSON results.
//!
//! ```text
//! carbon_cli <project.carbon> [--settings <settings.json>]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use carbon_core::compliance::ghg::{GhgInventory, GhgScopeCalculator};
use carbon_core::config::EngineSettings;
use carbon_core::file_io::{load_project, load_settings};
use carbon_core::optimization::OptimizationRecommendationCache;
use carbon_core::units::KgCo2e;
use carbon_core::{
    CalcResult, ComplianceResult, ComplianceStandardsEngine, EpdStageResult, LifecycleEmissionsCalculator,
    OptimizationReport, Project, RegionalFactorRegistry,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct AssessmentReport {
    job_id: String,
    country: String,
    lifecycle: EpdStageResult,
    compliance: ComplianceResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    ghg: Option<GhgInventory>,
    optimization: OptimizationReport,
}

struct Args {
    project: PathBuf,
    settings: Option<PathBuf>,
}

fn parse_args() -> Option<Args> {
    let mut args = std::env::args().skip(1);
    let mut project = None;
    let mut settings = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--settings" | "-s" => settings = Some(PathBuf::from(args.next()?)),
            _ if project.is_none() => project = Some(PathBuf::from(arg)),
            _ => return None,
        }
    }

    Some(Args {
        project: project?,
        settings,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let Some(args) = parse_args() else {
        eprintln!("Usage: carbon_cli <project.carbon> [--settings <settings.json>]");
        return ExitCode::from(2);
    };

    match run(&args.project, args.settings.as_deref()).await {
        Ok(report) => {
            print_summary(&report);
            println!();
            println!("JSON Output (for LLM/API use):");
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Failed to serialize report: {}", e),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(project_path: &Path, settings_path: Option<&Path>) -> CalcResult<AssessmentReport> {
    let settings = match settings_path {
        Some(path) => load_settings(path)?,
        None => EngineSettings::default(),
    };
    let project: Project = load_project(project_path)?;
    let country = project.country_or(&settings.default_country).to_string();
    tracing::info!(job_id = %project.meta.job_id, %country, "assessing project");

    let registry = RegionalFactorRegistry::with_defaults();
    if !registry.is_registered(&country) {
        tracing::warn!(%country, "country not in catalog, default factors apply");
    }

    let calculator = LifecycleEmissionsCalculator::new(&registry, settings.parameters)
        .with_default_country(settings.default_country.clone());
    let lifecycle = calculator.calculate(&project.lifecycle_input())?;

    let engine = ComplianceStandardsEngine::with_default_catalog();
    let compliance =
        engine.calculate_compliance(&project.settings.standard_id, &project.compliance, &project.inputs.materials)?;

    let ghg = match project.ghg_activity(&settings.default_country) {
        Some(activity) => Some(GhgScopeCalculator::new(&registry).inventory(&activity)?),
        None => None,
    };

    let cache = OptimizationRecommendationCache::new(&settings.cache);
    let optimization = cache.get(&project.inputs.materials).await;

    Ok(AssessmentReport {
        job_id: project.meta.job_id.clone(),
        country,
        lifecycle,
        compliance,
        ghg,
        optimization,
    })
}

fn print_summary(report: &AssessmentReport) {
    let modules = report.lifecycle.modules();

    println!("═══════════════════════════════════════");
    println!("  CARBON ASSESSMENT  {} ({})", report.job_id, report.country);
    println!("═══════════════════════════════════════");
    println!();
    println!("Life cycle (kg CO2e):");
    println!("  Product      A1-A3  {:>14.1}", modules.product);
    println!("  Construction A4-A5  {:>14.1}", modules.construction);
    println!("  Use          B1-B7  {:>14.1}", modules.use_stage);
    println!("  End of life  C1-C4  {:>14.1}", modules.end_of_life);
    println!("  Beyond       D      {:>14.1}", modules.beyond_system);
    println!(
        "  Total               {:>14.1}  ({:.2} t)",
        report.lifecycle.total_co2e,
        KgCo2e(report.lifecycle.total_co2e).tonnes()
    );
    println!();
    println!("Compliance ({}):", report.compliance.standard_id);
    println!("  Score: {:.1}", report.compliance.overall_score);
    println!(
        "  Level: {} {}",
        report.compliance.level_display(),
        status_icon(report.compliance.compliance)
    );
    for rec in &report.compliance.recommendations {
        println!("  - {}", rec);
    }

    if let Some(ghg) = &report.ghg {
        println!();
        println!("GHG inventory (kg CO2e):");
        println!("  Scope 1  {:>14.1}", ghg.scope1.total);
        println!("  Scope 2  {:>14.1}", ghg.scope2.total);
        println!("  Scope 3  {:>14.1}", ghg.scope3.total);
        println!("  Total    {:>14.1}", ghg.total_emissions);
    }

    println!();
    println!("Optimization ({:?}):", report.optimization.source);
    for alt in &report.optimization.alternatives {
        println!(
            "  {} -> {}: -{:.0}% ({:.1} kg CO2e)",
            alt.original, alt.alternative, alt.reduction_percent, alt.reduction_kg
        );
    }
    println!("  Potential saving: {:.1} kg CO2e", report.optimization.total_reduction_kg);
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
