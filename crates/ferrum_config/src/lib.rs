//! Parsing and validation of `ferrum.toml` project configuration files.
//!
//! A project names the serialized design graph to lower and the settings of
//! the RTLIL backend. [`load_config`] reads and validates the file;
//! [`resolve_paths`] anchors its relative paths at the project directory.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, validate_top, CONFIG_FILE};
pub use resolve::{resolve_paths, ResolvedPaths};
pub use types::*;
