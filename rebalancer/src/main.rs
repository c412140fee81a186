//! CLI entry point for the flowsplit rebalancer.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use flowsplit::Strategy;
use log::info;

use flowsplit_rebalancer::config::{Config, OutputFormat};
use flowsplit_rebalancer::error::{Error, Result};
use flowsplit_rebalancer::report::{self, Comparison, Holdings, PlanTable};
use flowsplit_rebalancer::scenario::Scenario;

#[derive(Parser)]
#[command(name = "rebalancer")]
#[command(about = "Split a deposit or withdrawal across assets toward a target allocation")]
#[command(version)]
struct Cli {
    /// Path to rebalancer.toml (defaults are used if it does not exist)
    #[arg(long, default_value = "rebalancer.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute and print the split for a scenario
    Run {
        /// Path to scenario.json
        scenario: PathBuf,

        /// Override the configured strategy (unconstrained | constrained, aliases: free | no-sell)
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show both strategies side by side
    Compare {
        /// Path to scenario.json
        scenario: PathBuf,
    },

    /// Validate a scenario and show its current allocation
    Check {
        /// Path to scenario.json
        scenario: PathBuf,
    },
}

fn load_scenario(path: &Path, config: &Config) -> Result<Scenario> {
    let scenario = Scenario::load(path, config.rebalance.target_tolerance)?;
    info!(
        "Loaded scenario '{}' with {} assets",
        scenario.heading(),
        scenario.assets.len()
    );
    Ok(scenario)
}

fn run(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Run {
            scenario,
            strategy,
            json,
        } => {
            let scenario = load_scenario(&scenario, config)?;
            let strategy = strategy.unwrap_or(config.rebalance.strategy);
            let plan = scenario.plan(strategy)?;

            if json || config.output.format == OutputFormat::Json {
                println!("{}", report::render_json(&scenario, std::slice::from_ref(&plan))?);
            } else {
                println!("{}\n", scenario.heading());
                print!(
                    "{}",
                    PlanTable {
                        plan: &plan,
                        output: &config.output,
                    }
                );
            }
        }
        Command::Compare { scenario } => {
            let scenario = load_scenario(&scenario, config)?;
            let free = scenario.plan(Strategy::Unconstrained)?;
            let bound = scenario.plan(Strategy::Constrained)?;

            if config.output.format == OutputFormat::Json {
                println!("{}", report::render_json(&scenario, &[free, bound])?);
            } else {
                println!("{}\n", scenario.heading());
                print!(
                    "{}",
                    Comparison {
                        left: &free,
                        right: &bound,
                        output: &config.output,
                    }
                );
            }
        }
        Command::Check { scenario } => {
            let scenario = load_scenario(&scenario, config)?;
            print!(
                "{}",
                Holdings {
                    scenario: &scenario,
                    output: &config.output,
                }
            );
            println!("\nScenario OK: {}", scenario.title());
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(&config, cli.command) {
        match &e {
            Error::Scenario(msg) => {
                eprintln!("\nRejected: {msg}");
                process::exit(2);
            }
            _ => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}
