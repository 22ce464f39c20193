//! I/O adapters around the Mosaic floorplanning engine.
//!
//! Parses the `.block`/`.nets` circuit descriptions into a
//! [`Netlist`](mosaic_model::Netlist), and renders a finished search as a
//! result file, a human-readable summary, or an SVG image. The engine itself
//! never touches a file format.

#![warn(missing_docs)]

pub mod error;
pub mod parse;
pub mod report;
pub mod svg;

pub use error::ParseError;
pub use parse::{load_circuit, parse_blocks, parse_nets, Circuit};
pub use report::{summary_text, write_result};
pub use svg::render_svg;
