//! Shared foundational types used across the Mosaic floorplanner.
//!
//! This crate provides the dense ID-indexed [`Arena`] used by the netlist
//! model. Contract violations inside the engine panic at the point of
//! failure; recoverable errors live with the I/O and configuration crates
//! that produce them.

#![warn(missing_docs)]

pub mod arena;

pub use arena::{Arena, ArenaId};
