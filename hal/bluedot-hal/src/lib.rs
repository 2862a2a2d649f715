//! Blue Dot Hardware Abstraction Layer
//!
//! This crate defines the traits and value types that sit between the
//! touch-to-protocol core and whatever actually moves bytes and reads
//! fingers. The same core runs against a Bluetooth serial socket, a TCP
//! bridge or an in-memory fake in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (bluedot-client, tests)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bluedot-core (session, grid, pointers) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bluedot-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`link::Transport`] - Outbound half of a byte-stream link
//!
//! # Types
//!
//! - [`touch::TouchInput`] - Raw finger events fed to the session

#![no_std]
#![deny(unsafe_code)]

pub mod link;
pub mod touch;

// Re-export key types at crate root for convenience
pub use link::{LinkState, Transport};
pub use touch::{PointerId, TouchInput, TouchPoint};
