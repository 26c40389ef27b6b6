//! Parsing of `pnr.toml` project manifests.
//!
//! This crate reads the optional project manifest and produces a strongly
//! typed [`ProjectConfig`] carrying input/output paths and placer/router
//! tuning parameters. CLI flags always take precedence over manifest values.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{PathsConfig, PlacementConfig, ProjectConfig, RouterConfig};
