//! Mosaic CLI — the command-line interface for the Mosaic floorplanner.
//!
//! Provides `mosaic plan` to search for a placement and write the result
//! artifacts, and `mosaic check` to validate a pair of input files without
//! running the search.

#![warn(missing_docs)]

mod check;
mod plan;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Mosaic — a B*-tree fixed-outline floorplanner.
#[derive(Parser, Debug)]
#[command(name = "mosaic", version, about = "Mosaic floorplanner")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose progress output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `mosaic.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for a placement and write the result file.
    Plan(PlanArgs),
    /// Parse and validate the input files without searching.
    Check(CheckArgs),
}

/// Arguments for the `mosaic plan` subcommand.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Path to the `.block` description (outline, blocks, terminals).
    pub blocks: PathBuf,

    /// Path to the `.nets` description.
    pub nets: PathBuf,

    /// Path of the result file to write; defaults to the configuration's
    /// `output.result`, or `floorplan.rpt`.
    pub output: Option<PathBuf>,

    /// Area/wirelength blend weight in [0, 1]; overrides the configuration.
    #[arg(short, long)]
    pub alpha: Option<f64>,

    /// RNG seed for a reproducible run; overrides the configuration.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also render the placement to an SVG file at this path.
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Retry budget when the placement does not fit; overrides the configuration.
    #[arg(long)]
    pub max_restarts: Option<usize>,

    /// Summary output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `mosaic check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the `.block` description.
    pub blocks: PathBuf,

    /// Path to the `.nets` description.
    pub nets: PathBuf,
}

/// Summary output format for `mosaic plan`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary block.
    Text,
    /// Machine-readable JSON summary.
    Json,
}

fn main() {
    let cli = Cli::parse();
    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    };
    process::exit(code);
}

fn run(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Plan(args) => plan::run(args, cli),
        Command::Check(args) => check::run(args, cli),
    }
}
