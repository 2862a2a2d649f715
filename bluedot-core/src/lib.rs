//! Board-agnostic core logic for the Blue Dot touch client
//!
//! This crate contains all client logic that does not depend on a
//! particular link, screen or input device:
//!
//! - Grid model (cells, layout, hit testing)
//! - Pointer tracking (press/move/release per finger)
//! - Command processing (server appearance commands)
//! - Session (serialized handling of touch, link and inbound data)
//! - Renderer trait
//! - Configuration type definitions

// std is linked for tests so proptest can run
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod command;
pub mod config;
pub mod grid;
pub mod pointer;
pub mod session;
pub mod traits;
