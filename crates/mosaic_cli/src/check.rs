//! `mosaic check` — validate the input files without running the search.

use crate::{CheckArgs, Cli};

/// Runs the `mosaic check` command.
///
/// Parses both description files and prints a one-line inventory. Any
/// format violation surfaces as an error before the engine is involved.
pub fn run(args: &CheckArgs, cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let circuit = mosaic_io::load_circuit(&args.blocks, &args.nets)?;
    if !cli.quiet {
        println!(
            "ok: {} blocks, {} terminals, {} nets, outline {}x{}",
            circuit.netlist.block_count(),
            circuit.netlist.terminals.len(),
            circuit.netlist.nets.len(),
            circuit.outline.0,
            circuit.outline.1
        );
    }
    Ok(0)
}
