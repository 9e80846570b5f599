//! Parsing and validation of the `[netlist]` section of `weft.toml`.
//!
//! The netlist builder reads an error limit for its diagnostic sink and a
//! level for each construction-time check. Every field has a default, so an
//! empty file (or no `[netlist]` table at all) is a valid configuration.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::*;
