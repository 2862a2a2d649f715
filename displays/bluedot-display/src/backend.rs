//! Canvas backend trait
//!
//! Defines the interface for whatever actually puts pixels on a screen.

use bluedot_core::grid::{Argb, Rect};

/// Canvas errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawError {
    /// Command buffer full
    Overflow,
}

impl core::fmt::Display for DrawError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DrawError::Overflow => write!(f, "draw buffer full"),
        }
    }
}

/// Outline of a drawn element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    Rect,
    /// Ellipse inscribed in the bounds
    Oval,
}

/// How a shape is painted
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Style {
    Fill(Argb),
    /// Outline centred on the bounds
    Stroke { color: Argb, width: f32 },
}

/// Canvas trait
///
/// Provides a toolkit-agnostic interface for painting the grid.
pub trait Canvas {
    /// Clear the whole canvas to `color`
    fn clear(&mut self, color: Argb) -> Result<(), DrawError>;

    /// Draw one shape within `bounds`
    fn draw(&mut self, shape: Shape, bounds: Rect, style: Style) -> Result<(), DrawError>;

    /// Flush buffered content to the screen
    fn flush(&mut self) -> Result<(), DrawError>;
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn clear(&mut self, color: Argb) -> Result<(), DrawError> {
        (**self).clear(color)
    }

    fn draw(&mut self, shape: Shape, bounds: Rect, style: Style) -> Result<(), DrawError> {
        (**self).draw(shape, bounds, style)
    }

    fn flush(&mut self) -> Result<(), DrawError> {
        (**self).flush()
    }
}
