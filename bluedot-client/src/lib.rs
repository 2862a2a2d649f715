//! Blue Dot host client
//!
//! Wires the touch core to real I/O on a desktop host:
//!
//! - a link thread talking to the server over TCP or a serial device
//! - an input thread reading a touch script from stdin
//! - a console renderer for the surface and status notices
//! - the session task on an embassy executor, fed through one channel
//!
//! ```text
//!  stdin ──► input thread ──┐
//!                           ├──► TASKS ──► session_task ──► SharedLink ──► server
//!  server ──► link thread ──┘                   │
//!                                               └──► ConsoleRenderer ──► stdout
//! ```

#![deny(unsafe_code)]

pub mod channels;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod link;
pub mod tasks;
pub mod telemetry;

#[cfg(test)]
#[path = "../build_support.rs"]
mod build_support;

pub use error::{ClientError, Result};
