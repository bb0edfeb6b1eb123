// stance_sim/examples/01_walking_biped.rs

//! Runs the legged odometry on a simulated walking biped.
//!
//! This example demonstrates how to:
//! 1. Load a simulation scenario from a TOML file (or a whole directory of them).
//! 2. Run the odometry on the measurements of the simulated walk.
//! 3. Report the drift of the estimate with respect to the ground truth.
//!
//! To run this example:
//! `cargo run --example 01_walking_biped -- --scenario assets/scenarios/01_turning_noisy.toml`
//!
//! Scenario values can be overridden from the environment, e.g.
//! `STANCE_SIMULATION__SEED=3 STANCE_NOISE__FORCE_STD=5.0`.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stance_sim::prelude::*;

fn main() -> ExitCode {
    // --- 1. Logging ---
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("stance_sim=info".parse().unwrap())
                .add_directive("stance_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // --- 2. Collect the Scenarios ---
    let scenarios: Vec<PathBuf> = match &cli.scenario_dir {
        Some(dir) => discover_scenarios(dir)?,
        None => vec![cli.scenario.clone()],
    };
    if scenarios.is_empty() {
        info!("No scenario to run.");
        return Ok(());
    }

    // --- 3. Run Each of Them ---
    let mut summaries = Vec::with_capacity(scenarios.len());
    for path in &scenarios {
        let scenario = load_scenario(path)?;
        if cli.dump_config {
            println!("# {}\n{}", path.display(), dump_scenario(&scenario)?);
            continue;
        }

        info!(
            "Running {} ({} detection, {})",
            path.display(),
            scenario.odometry.contacts_detection_mode,
            if scenario.odometry.odometry6d { "6D" } else { "flat" }
        );
        let summary = Runner::new(scenario)?.run(cli.cycles)?;
        summaries.push((path, summary));
    }

    // --- 4. Report ---
    for (path, summary) in &summaries {
        println!(
            "{:<40} cycles {:>6}  held {:>4}  pos err {:>8.4} m (max {:>8.4})  yaw err {:>7.3} deg (max {:>7.3})",
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            summary.cycles,
            summary.held_cycles,
            summary.final_error.position,
            summary.max_position_error,
            summary.final_error.yaw.to_degrees(),
            summary.max_yaw_error.to_degrees(),
        );
    }
    Ok(())
}
