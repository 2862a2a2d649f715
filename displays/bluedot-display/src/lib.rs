//! Canvas abstraction and shared painting for Blue Dot front-ends
//!
//! This crate provides:
//! - `Canvas` trait for anything that can fill and stroke rectangles and ovals
//! - `paint_grid`, which turns the grid model into canvas calls
//! - `DrawList`, a canvas that records calls instead of drawing
//! - `TextScreen`, a character-cell preview of the grid
//!
//! # Architecture
//!
//! Front-ends implement `Canvas` with their toolkit-specific code. The
//! session's renderer calls `paint_grid` without caring what is underneath.
//!
//! ## Cell appearance
//!
//! - Invisible cells are painted transparent, keeping their slot
//! - Bordered cells fill their inner bounds and stroke their outer bounds
//! - `square` chooses a rectangle, otherwise an oval inscribed in the bounds

#![no_std]

extern crate alloc;

pub mod backend;
pub mod paint;
pub mod record;
pub mod screen;

// Re-export key types
pub use backend::{Canvas, DrawError, Shape, Style};
pub use paint::{paint_grid, BORDER_COLOR};
pub use record::{DrawList, DrawOp};
pub use screen::TextScreen;
