//! Profile projector lab CLI.
//!
//! Runs scripted sessions against the measurement engine and lists the
//! loaded catalogs.
//!
//! # Usage
//!
//! ```bash
//! # Run a session script
//! projector_lab run sessions/gear_od.yaml
//!
//! # Run a built-in walkthrough, JSON output
//! projector_lab -o json demo angle
//!
//! # List tutorials from a custom catalog
//! PROJECTOR_LAB_TUTORIALS=my_tutorials.yaml projector_lab tutorials
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use profile_projector::report;
use profile_projector::{AssetPaths, LabAssets, RunSummary, SessionRunner, SessionScript};

const GEAR_DEMO: &str = include_str!("../../sessions/gear_od.yaml");
const ANGLE_DEMO: &str = include_str!("../../sessions/angle_measure.yaml");

#[derive(Parser)]
#[command(name = "projector_lab")]
#[command(version = "0.1.0")]
#[command(about = "Profile projector virtual lab: scripted sessions and catalogs")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Lab config YAML (tolerance, defaults, idle prompt)
    #[arg(long, global = true, env = "PROJECTOR_LAB_CONFIG")]
    config: Option<PathBuf>,

    /// Tutorial catalog YAML (replaces the built-in tutorials)
    #[arg(long, global = true, env = "PROJECTOR_LAB_TUTORIALS")]
    tutorials: Option<PathBuf>,

    /// Sample catalog YAML (replaces the built-in samples)
    #[arg(long, global = true, env = "PROJECTOR_LAB_SAMPLES")]
    samples: Option<PathBuf>,

    /// Key binding YAML
    #[arg(long, global = true, env = "PROJECTOR_LAB_INPUT")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "text", value_enum)]
    format: OutputFormat,

    /// Debug logging for the lab crates
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    Gear,
    Angle,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a session script
    Run {
        /// Script file
        script: PathBuf,
    },

    /// Run a built-in walkthrough
    Demo {
        #[arg(value_enum)]
        which: Demo,
    },

    /// List available tutorials
    Tutorials,

    /// List samples for the configured experiment
    Samples,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                let output = serde_json::json!({ "error": format!("{e:#}") });
                println!("{output}");
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,projector_core=debug,projector_input=debug,profile_projector=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<bool> {
    let paths = AssetPaths {
        config: cli.config.clone(),
        tutorials: cli.tutorials.clone(),
        samples: cli.samples.clone(),
        input: cli.input.clone(),
    };
    let assets = LabAssets::load(&paths).context("loading lab assets")?;

    match &cli.command {
        Commands::Run { script } => {
            let script = SessionScript::load(script)
                .with_context(|| format!("loading session script {}", script.display()))?;
            run_script(&assets, &script, cli.format)
        }
        Commands::Demo { which } => {
            let yaml = match which {
                Demo::Gear => GEAR_DEMO,
                Demo::Angle => ANGLE_DEMO,
            };
            let script = SessionScript::from_yaml_str(yaml).context("parsing built-in demo")?;
            run_script(&assets, &script, cli.format)
        }
        Commands::Tutorials => {
            match cli.format {
                OutputFormat::Json => {
                    let listing: Vec<_> = assets
                        .tutorials
                        .iter()
                        .map(|s| {
                            serde_json::json!({
                                "name": s.name,
                                "title": s.title,
                                "steps": s.steps.len(),
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&listing)?);
                }
                OutputFormat::Text => print!("{}", report::render_tutorials(&assets.tutorials)),
            }
            Ok(true)
        }
        Commands::Samples => {
            let experiment = &assets.config.experiment_id;
            match cli.format {
                OutputFormat::Json => {
                    let samples = assets.samples.samples_for(experiment);
                    println!("{}", serde_json::to_string_pretty(samples)?);
                }
                OutputFormat::Text => {
                    print!("{}", report::render_samples(&assets.samples, experiment))
                }
            }
            Ok(true)
        }
    }
}

fn run_script(assets: &LabAssets, script: &SessionScript, format: OutputFormat) -> Result<bool> {
    let summary = SessionRunner::new(assets).run(script);
    print_summary(&summary, format)?;
    Ok(summary.passed())
}

fn print_summary(summary: &RunSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", report::to_json(summary).context("serializing run summary")?);
        }
        OutputFormat::Text => {
            let status = if summary.passed() {
                "PASS".green().bold()
            } else {
                "FAIL".red().bold()
            };
            println!("{status} {}", report::render_text(summary));
        }
    }
    Ok(())
}
