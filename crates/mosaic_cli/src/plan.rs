//! `mosaic plan` — run the floorplanning search and write the result artifacts.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use mosaic_config::FloorplanConfig;
use mosaic_engine::{floorplan, FloorplanStats, MoveWeights, SearchParams};
use serde::Serialize;

use crate::{Cli, PlanArgs, ReportFormat};

/// Runs the `mosaic plan` command.
///
/// Loads configuration, merges command-line overrides, runs the search, and
/// writes the result file (plus optional SVG). Returns exit code 0 when the
/// placement fits the outline, 1 when it does not after the retry budget.
pub fn run(args: &PlanArgs, cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Path::new("mosaic.toml").to_path_buf());
    let config = mosaic_config::load_config(&config_path)?;
    let params = merge_params(&config, args)?;

    let circuit = mosaic_io::load_circuit(&args.blocks, &args.nets)?;
    let mut netlist = circuit.netlist;

    if !cli.quiet {
        eprintln!(
            "  Planning {} blocks, {} terminals, {} nets in a {}x{} outline",
            netlist.block_count(),
            netlist.terminals.len(),
            netlist.nets.len(),
            circuit.outline.0,
            circuit.outline.1
        );
    }
    if cli.verbose {
        eprintln!("    Search {params:?}");
    }

    let plan = floorplan(&mut netlist, circuit.outline, params);

    let output = args
        .output
        .clone()
        .or_else(|| config.output.result.as_deref().map(Into::into))
        .unwrap_or_else(|| PathBuf::from("floorplan.rpt"));
    let file = File::create(&output)?;
    let mut writer = BufWriter::new(file);
    mosaic_io::write_result(&mut writer, &netlist, &plan.stats)?;

    let svg_path = args
        .svg
        .clone()
        .or_else(|| config.output.svg.as_deref().map(Into::into));
    if let Some(path) = svg_path {
        std::fs::write(path, mosaic_io::render_svg(&netlist, circuit.outline))?;
    }

    if !cli.quiet {
        match args.format {
            ReportFormat::Text => {
                println!("{}", mosaic_io::summary_text(&plan.stats, circuit.outline));
            }
            ReportFormat::Json => {
                let summary = JsonSummary::new(&plan.stats, circuit.outline);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
    }

    Ok(if plan.stats.fits { 0 } else { 1 })
}

/// Applies command-line overrides on top of the loaded configuration.
fn merge_params(
    config: &FloorplanConfig,
    args: &PlanArgs,
) -> Result<SearchParams, Box<dyn std::error::Error>> {
    let search = &config.search;
    let alpha = args.alpha.unwrap_or(search.alpha);
    if !(0.0..=1.0).contains(&alpha) {
        return Err(format!("--alpha must be within [0, 1], got {alpha}").into());
    }
    Ok(SearchParams {
        alpha,
        cooling_rate: search.cooling_rate,
        min_temperature: search.min_temperature,
        moves_per_block: search.moves_per_block,
        calibration_moves: search.calibration_moves,
        initial_acceptance: search.initial_acceptance,
        max_restarts: args.max_restarts.unwrap_or(search.max_restarts),
        seed: args.seed.or(search.seed),
        weights: MoveWeights {
            rotate: search.rotate_weight,
            swap: search.swap_weight,
            delete_insert: search.delete_insert_weight,
        },
    })
}

/// Flat JSON view of [`FloorplanStats`] with the runtime in seconds.
#[derive(Serialize)]
struct JsonSummary {
    cost: f64,
    wirelength: f64,
    area: u64,
    width: u64,
    height: u64,
    outline_width: u64,
    outline_height: u64,
    fits: bool,
    runtime_seconds: f64,
    restarts: usize,
}

impl JsonSummary {
    fn new(stats: &FloorplanStats, outline: (u64, u64)) -> Self {
        Self {
            cost: stats.cost,
            wirelength: stats.wirelength,
            area: stats.area,
            width: stats.width,
            height: stats.height,
            outline_width: outline.0,
            outline_height: outline.1,
            fits: stats.fits,
            runtime_seconds: stats.elapsed.as_secs_f64(),
            restarts: stats.restarts,
        }
    }
}
