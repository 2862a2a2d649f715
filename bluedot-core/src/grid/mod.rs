//! Grid model
//!
//! A dense `cols × rows` array of cells addressed by [`CellId`]. The grid
//! owns layout (square cells centred on the surface) and hit testing. It
//! knows nothing about fingers or the wire.
//!
//! ```text
//!  width-bound (wide cells would overflow horizontally)
//!  ┌──────────────────────────────┐
//!  │            top               │
//!  │ ┌────┬────┬────┬────┬────┐   │
//!  │ │0,0 │1,0 │2,0 │3,0 │4,0 │   │
//!  │ ├────┼────┼────┼────┼────┤   │
//!  │ │0,1 │1,1 │2,1 │3,1 │4,1 │   │
//!  │ └────┴────┴────┴────┴────┘   │
//!  │                              │
//!  └──────────────────────────────┘
//! ```

mod cell;
mod color;
mod geometry;

use alloc::vec::Vec;

use bluedot_protocol::MAX_DIMENSION;

pub use cell::{Cell, CellId};
pub use color::{Argb, PRESSED_FACTOR};
pub use geometry::Rect;

/// Fraction of the surface reserved for the outer border and used as the
/// cell stroke width
pub const DEFAULT_BORDER_THICKNESS: f32 = 0.025;

/// The cell grid
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: u16,
    rows: u16,
    /// Column-major: `col * rows + row`
    cells: Vec<Cell>,
    visible: bool,
    default_color: Argb,
    border_thickness: f32,
    width: u32,
    height: u32,
    bounds: Rect,
    cell_size: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl Grid {
    /// Create a grid with the default color and border thickness
    pub fn new(cols: u16, rows: u16) -> Self {
        Self::with_style(cols, rows, Argb::BLUE, DEFAULT_BORDER_THICKNESS)
    }

    pub fn with_style(cols: u16, rows: u16, default_color: Argb, border_thickness: f32) -> Self {
        let mut grid = Self {
            cols: 1,
            rows: 1,
            cells: Vec::new(),
            visible: true,
            default_color,
            border_thickness,
            width: 0,
            height: 0,
            bounds: Rect::EMPTY,
            cell_size: 0,
        };
        grid.set_size(cols, rows);
        grid
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn default_color(&self) -> Argb {
        self.default_color
    }

    pub fn border_thickness(&self) -> f32 {
        self.border_thickness
    }

    /// Surface size last passed to [`layout`](Grid::layout)
    pub fn surface(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Full surface as a rectangle
    pub fn surface_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Area covered by the cells
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Side of one (square) cell in pixels
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Stroke width for cell borders, at least one pixel
    pub fn stroke_width(&self) -> f32 {
        let stroke = self.cell_size as f32 * self.border_thickness;
        if stroke < 1.0 {
            1.0
        } else {
            stroke
        }
    }

    /// Inset of a bordered cell's fill from its bounds
    pub fn border_inset(&self) -> f32 {
        self.cell_size as f32 * self.border_thickness / 2.0
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Discard every cell and recreate `cols × rows` default cells
    ///
    /// Per-cell customization is lost. Sizes clamp to `1..=MAX_DIMENSION`.
    /// The existing surface size is laid out again.
    pub fn set_size(&mut self, cols: u16, rows: u16) {
        self.cols = cols.clamp(1, MAX_DIMENSION);
        self.rows = rows.clamp(1, MAX_DIMENSION);

        self.cells.clear();
        for col in 0..self.cols {
            for row in 0..self.rows {
                self.cells
                    .push(Cell::new(CellId::new(col, row), self.default_color));
            }
        }

        self.layout(self.width, self.height);
    }

    /// Compute cell bounds for a `width × height` surface
    ///
    /// Cells are square. The bound axis is the one where a cell would be
    /// smaller; a `border_thickness` share of it is kept as margin and the
    /// other axis is centred.
    pub fn layout(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        let (w, h) = (width as i64, height as i64);
        let (cols, rows) = (self.cols as i64, self.rows as i64);

        let (left, top, matrix_w, matrix_h, cell) = if w / cols < h / rows {
            let border = w as f32 * self.border_thickness;
            let cell = ((w as f32 - border) / cols as f32) as i64;
            let matrix_h = rows * cell;
            ((border / 2.0) as i64, (h - matrix_h) / 2, w, matrix_h, cell)
        } else {
            let border = h as f32 * self.border_thickness;
            let cell = ((h as f32 - border) / rows as f32) as i64;
            let matrix_w = cols * cell;
            ((w - matrix_w) / 2, (border / 2.0) as i64, matrix_w, h, cell)
        };

        self.cell_size = cell.max(0) as u32;
        self.bounds = Rect::new(
            left as f32,
            top as f32,
            (left + matrix_w) as f32,
            (top + matrix_h) as f32,
        );

        let rows = self.rows as i64;
        for (index, c) in self.cells.iter_mut().enumerate() {
            let (col, row) = (index as i64 / rows, index as i64 % rows);
            let x = left + col * cell;
            let y = top + row * cell;
            c.set_bounds(Rect::new(
                x as f32,
                y as f32,
                (x + cell) as f32,
                (y + cell) as f32,
            ));
        }
    }

    fn index(&self, id: CellId) -> Option<usize> {
        if id.col < self.cols && id.row < self.rows {
            Some(id.col as usize * self.rows as usize + id.row as usize)
        } else {
            None
        }
    }

    /// Resolve a signed wire address to a cell id
    pub fn lookup(&self, col: i32, row: i32) -> Option<CellId> {
        let id = CellId::new(u16::try_from(col).ok()?, u16::try_from(row).ok()?);
        self.index(id).map(|_| id)
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.index(id).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.index(id).map(move |i| &mut self.cells[i])
    }

    /// Cells in column-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cell under a surface point, if any
    pub fn hit(&self, x: f32, y: f32) -> Option<CellId> {
        if self.cell_size == 0 || !self.bounds.contains(x, y) {
            return None;
        }
        let col = (x - self.bounds.left) as u32 / self.cell_size;
        let row = (y - self.bounds.top) as u32 / self.cell_size;
        if col < self.cols as u32 && row < self.rows as u32 {
            Some(CellId::new(col as u16, row as u16))
        } else {
            None
        }
    }

    pub fn set_color(&mut self, color: Argb) {
        self.cells.iter_mut().for_each(|c| c.set_color(color));
    }

    pub fn set_square(&mut self, square: bool) {
        self.cells.iter_mut().for_each(|c| c.set_square(square));
    }

    pub fn set_border(&mut self, border: bool) {
        self.cells.iter_mut().for_each(|c| c.set_border(border));
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.cells.iter_mut().for_each(|c| c.set_visible(visible));
    }
}
