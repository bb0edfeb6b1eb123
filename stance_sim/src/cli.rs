// stance_sim/src/cli.rs

use clap::Parser;
use std::path::PathBuf;

/// Stance: walks a simulated biped and reports the drift of its legged odometry.
///
/// This struct defines the command-line arguments that can be passed to any
/// binary application that uses the stance simulation library.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(
        short,
        long,
        default_value = "assets/scenarios/00_straight_walk.toml"
    )]
    pub scenario: PathBuf,

    /// Run every scenario found in this directory instead of a single one.
    #[arg(long, conflicts_with = "scenario")]
    pub scenario_dir: Option<PathBuf>,

    /// Number of control cycles to run. Defaults to the scenario duration.
    #[arg(short, long)]
    pub cycles: Option<usize>,

    /// Print the effective scenario (defaults and overrides applied) and exit.
    #[arg(long, default_value_t = false)]
    pub dump_config: bool,
}
