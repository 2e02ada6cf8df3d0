//! Configuration model for bar.
//!
//! This module defines the Config struct that represents `bar.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, validation of config values and
//! discovery of the active config file.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use types::OutputFormat;
