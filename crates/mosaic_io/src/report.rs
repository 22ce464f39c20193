//! Result-file and summary rendering for a finished floorplan.
//!
//! The result file layout is fixed:
//!
//! ```text
//! <final cost>
//! <total wirelength>
//! <chip area>
//! <chip width> <chip height>
//! <search runtime in seconds>
//! <block name> <x1> <y1> <x2> <y2>     (one line per block)
//! ```

use mosaic_engine::FloorplanStats;
use mosaic_model::Netlist;
use std::io::{self, Write};

/// Writes the result file for a finished search.
pub fn write_result(
    out: &mut impl Write,
    netlist: &Netlist,
    stats: &FloorplanStats,
) -> io::Result<()> {
    writeln!(out, "{:.2}", stats.cost)?;
    writeln!(out, "{:.2}", stats.wirelength)?;
    writeln!(out, "{}", stats.area)?;
    writeln!(out, "{} {}", stats.width, stats.height)?;
    writeln!(out, "{:.3}", stats.elapsed.as_secs_f64())?;
    for block in netlist.blocks.values() {
        let r = &block.rect;
        writeln!(out, "{} {} {} {} {}", block.name, r.x1, r.y1, r.x2, r.y2)?;
    }
    Ok(())
}

/// Renders the human-readable summary block.
pub fn summary_text(stats: &FloorplanStats, outline: (u64, u64)) -> String {
    let mut text = String::new();
    text.push_str("==================== Summary ====================\n");
    text.push_str(&format!(" Cost:   {:.2}\n", stats.cost));
    text.push_str(&format!(" Wire:   {:.2}\n", stats.wirelength));
    text.push_str(&format!(" Area:   {}\n", stats.area));
    text.push_str(&format!(
        " Width:  {} (limit = {})\n",
        stats.width, outline.0
    ));
    text.push_str(&format!(
        " Height: {} (limit = {})\n",
        stats.height, outline.1
    ));
    text.push_str(&format!(
        " Fits:   {}\n",
        if stats.fits { "yes" } else { "no" }
    ));
    text.push_str(&format!(
        " Time:   {:.3}s ({} restarts)\n",
        stats.elapsed.as_secs_f64(),
        stats.restarts
    ));
    text.push_str("=================================================");
    text
}
