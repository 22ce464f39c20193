//! Placement cost evaluation.
//!
//! Packs a candidate tree, then blends chip area and total HPWL into one
//! scalar, with an overflow penalty that dominates whenever the packing
//! exceeds the chip outline so the search is steered toward feasibility
//! before it optimizes anything else.

use crate::pack::{pack, PackExtent};
use crate::tree::BStarTree;
use mosaic_model::Netlist;
use serde::{Deserialize, Serialize};

/// Multiplier applied to each unit of outline overflow. Orders of magnitude
/// above the normalized area/wire terms' typical scale.
pub const OVERFLOW_PENALTY: f64 = 1.0e4;

/// The cost model: area/wire blend weight, chip outline, and the running
/// normalization divisors sampled during annealer calibration.
#[derive(Debug, Clone)]
pub struct CostModel {
    /// Weight of the area term; the wirelength term gets `1 - alpha`.
    pub alpha: f64,
    /// Chip outline `(width, height)` limits.
    pub outline: (u64, u64),
    avg_area: f64,
    avg_wire: f64,
}

/// The full evaluation of one candidate: packed geometry plus the scalar cost.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// The blended scalar cost, including any overflow penalty.
    pub total: f64,
    /// Packed chip area.
    pub area: u64,
    /// Total half-perimeter wirelength.
    pub wirelength: f64,
    /// Packed extents.
    pub extent: PackExtent,
    /// Whether the packing fits inside the outline.
    pub fits: bool,
}

impl CostModel {
    /// Creates a cost model with no normalization (divisors of 1).
    pub fn new(alpha: f64, outline: (u64, u64)) -> Self {
        debug_assert!((0.0..=1.0).contains(&alpha));
        Self {
            alpha,
            outline,
            avg_area: 1.0,
            avg_wire: 1.0,
        }
    }

    /// Installs average-area and average-wirelength divisors observed during
    /// calibration. Non-positive samples are ignored and leave the previous
    /// divisor in place.
    pub fn set_normalization(&mut self, avg_area: f64, avg_wire: f64) {
        if avg_area > 0.0 {
            self.avg_area = avg_area;
        }
        if avg_wire > 0.0 {
            self.avg_wire = avg_wire;
        }
    }

    /// Packs the tree (overwriting block rectangles in the netlist) and
    /// returns the full cost breakdown.
    pub fn evaluate(&self, tree: &BStarTree, netlist: &mut Netlist) -> CostBreakdown {
        let extent = pack(tree, netlist);
        let wirelength = netlist.total_hpwl();
        self.combine(extent, wirelength)
    }

    /// Combines already-measured extents and wirelength into a breakdown.
    ///
    /// Split out from [`evaluate`](Self::evaluate) so calibration can re-cost
    /// a recorded walk after the normalization divisors are known.
    pub fn combine(&self, extent: PackExtent, wirelength: f64) -> CostBreakdown {
        let area = extent.area();
        let (limit_w, limit_h) = self.outline;
        let overflow_x = extent.width.saturating_sub(limit_w) as f64;
        let overflow_y = extent.height.saturating_sub(limit_h) as f64;
        let fits = extent.width <= limit_w && extent.height <= limit_h;

        let total = OVERFLOW_PENALTY * (overflow_x + overflow_y)
            + self.alpha * area as f64 / self.avg_area
            + (1.0 - self.alpha) * wirelength / self.avg_wire;

        CostBreakdown {
            total,
            area,
            wirelength,
            extent,
            fits,
        }
    }
}
