//! Parsing and validation of `mosaic.toml` configuration files.
//!
//! This crate reads the optional project configuration file and produces a
//! strongly-typed [`FloorplanConfig`] with defaults for every setting.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{FloorplanConfig, OutputConfig, SearchConfig};
