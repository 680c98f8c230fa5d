//! APT CLI - Command line tools for the airport navigation engine.
//!
//! This crate provides:
//! - catalog: JSON facility loader with validation
//! - config: environment configuration
//! - output: human-readable rendering of routes and approaches
//! - the `apt-nav` binary

pub mod catalog;
pub mod config;
pub mod output;

pub use catalog::{load_catalog, parse_catalog, CatalogError};
pub use config::Config;
