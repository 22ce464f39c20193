//! Axis-aligned rectangle geometry in chip units.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with integer corners, `(x1, y1)` lower-left and
/// `(x2, y2)` upper-right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x1: u64,
    /// Bottom edge.
    pub y1: u64,
    /// Right edge.
    pub x2: u64,
    /// Top edge.
    pub y2: u64,
}

impl Rect {
    /// Creates a rectangle from its corner coordinates.
    pub fn new(x1: u64, y1: u64, x2: u64, y2: u64) -> Self {
        debug_assert!(x1 <= x2 && y1 <= y2);
        Self { x1, y1, x2, y2 }
    }

    /// Returns the rectangle width.
    pub fn width(&self) -> u64 {
        self.x2 - self.x1
    }

    /// Returns the rectangle height.
    pub fn height(&self) -> u64 {
        self.y2 - self.y1
    }

    /// Returns the center point, used as the wirelength endpoint of a block.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.x1 + self.x2) as f64 / 2.0,
            (self.y1 + self.y2) as f64 / 2.0,
        )
    }
}
