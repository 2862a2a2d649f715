//! Configuration loading
//!
//! Loads the client configuration from a TOML file or the embedded
//! defaults, then applies command-line overrides.

pub mod loader;

pub use loader::{load_config, parse_config, Overrides, EMBEDDED_CONFIG};
