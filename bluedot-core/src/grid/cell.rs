//! A single cell of the grid

use super::color::{Argb, PRESSED_FACTOR};
use super::geometry::Rect;

/// Address of a cell, column first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CellId {
    pub col: u16,
    pub row: u16,
}

impl CellId {
    pub const ORIGIN: CellId = CellId::new(0, 0);

    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

/// Appearance and press state of one cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cell {
    id: CellId,
    bounds: Rect,
    released_color: Argb,
    pressed_color: Argb,
    border: bool,
    square: bool,
    visible: bool,
    pressed: bool,
}

impl Cell {
    /// A visible, borderless, round cell
    pub fn new(id: CellId, color: Argb) -> Self {
        Self {
            id,
            bounds: Rect::EMPTY,
            released_color: color,
            pressed_color: color.scale(PRESSED_FACTOR),
            border: false,
            square: false,
            visible: true,
            pressed: false,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    /// Pixel bounds; empty until the grid is laid out
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Fill area of a bordered cell
    pub fn inner_bounds(&self, inset: f32) -> Rect {
        self.bounds.inset(inset)
    }

    /// Color to paint now: shaded while pressed
    pub fn color(&self) -> Argb {
        if self.pressed {
            self.pressed_color
        } else {
            self.released_color
        }
    }

    /// The configured color
    pub fn released_color(&self) -> Argb {
        self.released_color
    }

    pub fn pressed_color(&self) -> Argb {
        self.pressed_color
    }

    pub fn set_color(&mut self, color: Argb) {
        self.released_color = color;
        self.pressed_color = color.scale(PRESSED_FACTOR);
    }

    pub fn border(&self) -> bool {
        self.border
    }

    pub fn set_border(&mut self, border: bool) {
        self.border = border;
    }

    /// True for a rectangle, false for an ellipse
    pub fn square(&self) -> bool {
        self.square
    }

    pub fn set_square(&mut self, square: bool) {
        self.square = square;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub(crate) fn press(&mut self) {
        self.pressed = true;
    }

    pub(crate) fn release(&mut self) {
        self.pressed = false;
    }
}
