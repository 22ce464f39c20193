//! Geometry and netlist model for the Mosaic floorplanner.
//!
//! Blocks, terminals, and nets are created once at load time and stay
//! immutable apart from block rectangles, which the packer rewrites on every
//! pack pass. Wirelength is evaluated lazily from the current rectangles.

#![warn(missing_docs)]

pub mod geom;
pub mod ids;
pub mod netlist;

pub use geom::Rect;
pub use ids::{BlockId, NetId, TerminalId};
pub use netlist::{Block, Net, NetPin, Netlist, Terminal};
