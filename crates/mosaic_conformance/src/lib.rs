//! Conformance test helpers for the Mosaic floorplanner.
//!
//! Provides shared pipeline functions that run circuit description text
//! through the full pipeline (parse → anneal → report) and return
//! structured results for assertion in integration tests.

#![warn(missing_docs)]

use mosaic_config::FloorplanConfig;
use mosaic_engine::{floorplan, Floorplan, SearchParams};
use mosaic_io::parse::{parse_blocks, parse_nets};
use mosaic_model::Netlist;

/// Result of running the full parse → anneal pipeline.
pub struct PlanResult {
    /// The netlist with block rectangles set to the best placement found.
    pub netlist: Netlist,
    /// Chip outline `(width, height)` limits from the block description.
    pub outline: (u64, u64),
    /// The winning tree and its summary metrics.
    pub plan: Floorplan,
}

/// Creates deterministic search parameters for test runs.
///
/// Restarts are raised above the default so feasibility assertions do not
/// flake on an unlucky seed.
pub fn make_params(seed: u64) -> SearchParams {
    SearchParams {
        seed: Some(seed),
        max_restarts: 8,
        ..SearchParams::default()
    }
}

/// Parses a `FloorplanConfig` from TOML text, as `mosaic.toml` would.
pub fn make_config(toml_str: &str) -> FloorplanConfig {
    mosaic_config::load_config_from_str(toml_str).expect("test config must be valid")
}

/// Runs the full pipeline on circuit description text.
///
/// Parses the block and net descriptions, then anneals with the given
/// parameters.
pub fn full_pipeline(blocks: &str, nets: &str, params: SearchParams) -> PlanResult {
    let (mut netlist, outline) = parse_blocks(blocks).expect("block text must parse");
    parse_nets(nets, &mut netlist).expect("net text must parse");
    let plan = floorplan(&mut netlist, outline, params);
    PlanResult {
        netlist,
        outline,
        plan,
    }
}

/// Asserts that no two placed blocks overlap.
///
/// Rectangles are half-open, so sharing an edge is not an overlap.
pub fn assert_disjoint(netlist: &Netlist) {
    let rects: Vec<_> = netlist
        .blocks
        .values()
        .map(|b| (b.name.clone(), b.rect))
        .collect();
    for (i, (name_a, a)) in rects.iter().enumerate() {
        for (name_b, b) in &rects[i + 1..] {
            let overlap = a.x1 < b.x2 && b.x1 < a.x2 && a.y1 < b.y2 && b.y1 < a.y2;
            assert!(!overlap, "{name_a} {a:?} overlaps {name_b} {b:?}");
        }
    }
}

/// A three-block circuit that tiles an 8x8 outline exactly.
pub fn three_block_circuit() -> (&'static str, &'static str) {
    let blocks = "\
Outline: 8 8
NumBlocks: 3
NumTerminals: 1
alpha 4 4
beta 4 4
gamma 8 4
p0 terminal 2 2
";
    let nets = "\
NumNets: 2
NetDegree: 2
alpha beta
NetDegree: 3
gamma p0 alpha
";
    (blocks, nets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_params_is_seeded() {
        let params = make_params(3);
        assert_eq!(params.seed, Some(3));
        assert_eq!(params.alpha, SearchParams::default().alpha);
    }

    #[test]
    fn make_config_parses_overrides() {
        let config = make_config("[search]\nalpha = 0.25\n");
        assert_eq!(config.search.alpha, 0.25);
    }

    #[test]
    fn three_block_circuit_parses() {
        let (blocks, nets) = three_block_circuit();
        let (mut netlist, outline) = parse_blocks(blocks).unwrap();
        parse_nets(nets, &mut netlist).unwrap();
        assert_eq!(outline, (8, 8));
        assert_eq!(netlist.block_count(), 3);
        assert_eq!(netlist.nets.len(), 2);
    }
}
