//! Configuration types
//!
//! Board-agnostic client configuration. The host shell fills these from
//! TOML; embedded front-ends can build them in code.

pub mod types;

pub use types::*;
