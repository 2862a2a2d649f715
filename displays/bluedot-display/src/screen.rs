//! Character-cell preview
//!
//! Renders the grid as text, one three-character slot per cell, for
//! terminals and logs:
//!
//! ```text
//!  o [#] o       o  round     #  square
//!  *  .  o       *  pressed   .  hidden
//!                [ ] bordered
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use bluedot_core::grid::{Cell, CellId, Grid};

/// Text rendering of a grid, one line per row
#[derive(Debug, Clone, Default)]
pub struct TextScreen {
    lines: Vec<String>,
    dirty: bool,
}

fn glyph(cell: &Cell) -> char {
    if !cell.visible() {
        '.'
    } else if cell.is_pressed() {
        '*'
    } else if cell.square() {
        '#'
    } else {
        'o'
    }
}

impl TextScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-render from the grid
    pub fn update(&mut self, grid: &Grid) {
        self.lines.clear();
        for row in 0..grid.rows() {
            let mut line = String::new();
            for col in 0..grid.cols() {
                let Some(cell) = grid.cell(CellId::new(col, row)) else {
                    continue;
                };
                let (open, close) = if cell.border() { ('[', ']') } else { (' ', ' ') };
                line.push(open);
                line.push(glyph(cell));
                line.push(close);
            }
            self.lines.push(String::from(line.trim_end()));
        }
        self.dirty = true;
    }

    /// Rendered rows, top first
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// True after an update that has not been presented
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
