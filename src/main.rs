//! Lease Economics CLI
//!
//! Project lease scenarios, compare them over a shared window, and check
//! rent schedules for inconsistencies.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use lease_economics::lease::{load_rent_steps, load_scenarios};
use lease_economics::{validate_scenario, CustomWindow, EngineConfig, LeaseScenario, MonthlyRow, ScenarioRunner};

#[derive(Parser)]
#[command(
    name = "lease-economics",
    version,
    about = "Month-by-month cash-flow projection and comparison of commercial leases"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project one scenario and print its metrics and annual roll-up
    Project(ProjectArgs),
    /// Project several scenarios and compare them over a shared window
    Compare(CompareArgs),
    /// Report rent-schedule and date inconsistencies without projecting
    Validate(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// JSON file holding one scenario or an array of scenarios
    #[arg(long, short)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct EngineArgs {
    /// Global annual discount rate (scenario overrides still win)
    #[arg(long, env = "LEASE_DISCOUNT_RATE")]
    discount_rate: Option<f64>,

    /// JSON engine config file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl EngineArgs {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_json_path(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => EngineConfig::default(),
        };
        if self.discount_rate.is_some() {
            config.discount_rate = self.discount_rate;
        }
        Ok(config)
    }
}

#[derive(Args)]
struct ProjectArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    engine: EngineArgs,

    /// Scenario id to project when the input holds several
    #[arg(long)]
    scenario: Option<String>,

    /// CSV rent table (start_month,end_month,rate_psf_yr) replacing the scenario's steps
    #[arg(long)]
    rent_steps: Option<PathBuf>,

    /// Write monthly rows to this CSV file
    #[arg(long)]
    monthly_csv: Option<PathBuf>,
}

#[derive(Args)]
struct CompareArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    engine: EngineArgs,

    /// Custom window start (YYYY-MM-DD); requires --end
    #[arg(long, requires = "end")]
    start: Option<String>,

    /// Custom window end (YYYY-MM-DD, inclusive); requires --start
    #[arg(long, requires = "start")]
    end: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Project(args) => run_project(args),
        Commands::Compare(args) => run_compare(args),
        Commands::Validate(args) => run_validate(args),
    }
}

fn read_inputs(input: &InputArgs) -> Result<Vec<LeaseScenario>> {
    if input.input.is_empty() {
        bail!("at least one --input <file.json> is required");
    }
    let mut scenarios = Vec::new();
    for path in &input.input {
        let loaded = load_scenarios(path).with_context(|| format!("loading {}", path.display()))?;
        scenarios.extend(loaded);
    }
    Ok(scenarios)
}

fn run_project(args: ProjectArgs) -> Result<()> {
    let scenarios = read_inputs(&args.input)?;
    let mut scenario = match &args.scenario {
        Some(id) => scenarios
            .into_iter()
            .find(|s| &s.id == id)
            .with_context(|| format!("scenario '{}' not found", id))?,
        None => scenarios.into_iter().next().context("input holds no scenarios")?,
    };

    if let Some(path) = &args.rent_steps {
        scenario.rent_schedule.steps =
            load_rent_steps(path).with_context(|| format!("loading rent table {}", path.display()))?;
        log::info!("Using {} rent step(s) from {}", scenario.rent_schedule.steps.len(), path.display());
    }

    let runner = ScenarioRunner::new(args.engine.engine_config()?);
    let result = runner.run(&scenario);

    if let Some(path) = &args.monthly_csv {
        write_monthly_csv(path, &result.monthly)?;
        log::info!("Monthly rows written to {}", path.display());
    }

    let output = json!({
        "termMonths": result.term_months,
        "discountRate": result.discount_rate,
        "metrics": result.metrics,
        "annual": result.annual,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_compare(args: CompareArgs) -> Result<()> {
    let scenarios = read_inputs(&args.input)?;
    let custom = match (args.start, args.end) {
        (Some(start), Some(end)) => Some(CustomWindow { start, end }),
        _ => None,
    };

    let runner = ScenarioRunner::new(args.engine.engine_config()?);
    let report = runner.compare(&scenarios, custom.as_ref());

    let metrics: Vec<_> = report.results.iter().map(|r| &r.metrics).collect();
    let output = json!({
        "scenarios": metrics,
        "equalized": report.equalized,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_validate(args: InputArgs) -> Result<()> {
    let scenarios = read_inputs(&args)?;
    for scenario in &scenarios {
        let warnings = validate_scenario(scenario);
        if warnings.is_empty() {
            println!("{}: ok", scenario.id);
        } else {
            for warning in warnings {
                println!("{}: {}", scenario.id, warning);
            }
        }
    }
    Ok(())
}

fn write_monthly_csv(path: &Path, rows: &[MonthlyRow]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
