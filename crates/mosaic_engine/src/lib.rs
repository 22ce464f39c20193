//! Floorplanning engine for the Mosaic toolchain.
//!
//! This crate takes a loaded [`Netlist`](mosaic_model::Netlist) and a chip
//! outline and searches for a placement of all blocks that minimizes a blend
//! of chip area and wirelength while respecting the outline. The search
//! space is the set of B*-trees over the blocks.
//!
//! # Pipeline
//!
//! 1. **Tree** — an arena-backed B*-tree encodes one candidate packing order
//! 2. **Neighborhood** — rotate / swap / delete-and-reinsert perturbations
//! 3. **Pack** — a contour (skyline) pass maps a tree to block coordinates
//! 4. **Cost** — area + wirelength blend with an outline-overflow penalty
//! 5. **Anneal** — Metropolis search across a self-calibrated cooling schedule
//!
//! # Usage
//!
//! ```ignore
//! use mosaic_engine::{floorplan, SearchParams};
//!
//! let plan = floorplan(&mut netlist, (width, height), SearchParams::default());
//! assert!(plan.stats.fits);
//! ```

#![warn(missing_docs)]

pub mod anneal;
pub mod cost;
pub mod neighborhood;
pub mod pack;
pub mod tree;

pub use anneal::{accept, Annealer, Floorplan, FloorplanStats, SearchParams};
pub use cost::{CostBreakdown, CostModel, OVERFLOW_PENALTY};
pub use neighborhood::{neighborhood, MoveWeights};
pub use pack::{pack, PackExtent};
pub use tree::{BStarTree, NodeId, Side, TreeNode};

use mosaic_model::Netlist;

/// Runs the complete floorplanning search on a loaded netlist.
///
/// On return the netlist's block rectangles hold the best placement found;
/// [`FloorplanStats::fits`] reports whether it satisfies the outline. The
/// search never fails: an input that cannot fit the outline comes back with
/// `fits = false` after the retry budget.
pub fn floorplan(netlist: &mut Netlist, outline: (u64, u64), params: SearchParams) -> Floorplan {
    let mut annealer = Annealer::new(netlist, outline, params);
    annealer.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floorplan_places_every_block() {
        let mut nl = Netlist::new();
        nl.add_block("a", 4, 4);
        nl.add_block("b", 2, 6);
        nl.add_block("c", 6, 2);
        let params = SearchParams {
            seed: Some(21),
            ..SearchParams::default()
        };
        let plan = floorplan(&mut nl, (8, 8), params);
        assert_eq!(plan.tree.len(), 3);
        for block in nl.blocks.values() {
            assert!(block.rect.x2 > block.rect.x1);
            assert!(block.rect.y2 > block.rect.y1);
        }
        assert!(plan.stats.elapsed.as_nanos() > 0);
    }

    #[test]
    fn search_is_infallible_on_infeasible_input() {
        // A block that can never fit still yields a plan, not a failure.
        let mut nl = Netlist::new();
        nl.add_block("giant", 10, 10);
        let params = SearchParams {
            seed: Some(4),
            max_restarts: 0,
            ..SearchParams::default()
        };
        let plan = floorplan(&mut nl, (4, 4), params);
        assert!(!plan.stats.fits);
        assert_eq!(plan.tree.len(), 1);
    }

    #[test]
    fn reexports_available() {
        let _ = BStarTree::chain(0);
        let _ = MoveWeights::default();
        let _ = SearchParams::default();
        let _ = CostModel::new(0.5, (1, 1));
    }
}
