//! Grid painting

use bluedot_core::grid::{Argb, Grid};

use crate::backend::{Canvas, DrawError, Shape, Style};

/// Stroke color of cell borders, dark grey
pub const BORDER_COLOR: Argb = Argb(0xFF44_4444);

/// Paint every cell of `grid`, then flush
///
/// Cells are painted in column-major order. Nothing is skipped: an
/// invisible cell is painted transparent so its slot is cleared.
pub fn paint_grid<C: Canvas>(grid: &Grid, canvas: &mut C) -> Result<(), DrawError> {
    canvas.clear(Argb::TRANSPARENT)?;

    let inset = grid.border_inset();
    let stroke = Style::Stroke {
        color: BORDER_COLOR,
        width: grid.stroke_width(),
    };

    for cell in grid.cells() {
        let fill = Style::Fill(if cell.visible() {
            cell.color()
        } else {
            Argb::TRANSPARENT
        });
        let shape = if cell.square() { Shape::Rect } else { Shape::Oval };

        if cell.border() {
            canvas.draw(shape, cell.inner_bounds(inset), fill)?;
            canvas.draw(shape, cell.bounds(), stroke)?;
        } else {
            canvas.draw(shape, cell.bounds(), fill)?;
        }
    }

    canvas.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DrawList, DrawOp};
    use bluedot_core::grid::{CellId, Rect};

    fn laid_out(cols: u16, rows: u16) -> Grid {
        let mut grid = Grid::new(cols, rows);
        grid.layout(1000, 400);
        grid
    }

    #[test]
    fn test_plain_cells() {
        let grid = laid_out(2, 1);
        let mut list = DrawList::new();
        paint_grid(&grid, &mut list).unwrap();

        assert_eq!(list.ops()[0], DrawOp::Clear(Argb::TRANSPARENT));
        assert_eq!(
            list.ops()[1],
            DrawOp::Draw {
                shape: Shape::Oval,
                bounds: Rect::new(110.0, 5.0, 500.0, 395.0),
                style: Style::Fill(Argb::BLUE),
            }
        );
        assert_eq!(list.ops().len(), 3);
        assert_eq!(list.flushes(), 1);
    }

    #[test]
    fn test_bordered_square_cell() {
        let mut grid = laid_out(2, 1);
        let cell = grid.cell_mut(CellId::new(1, 0)).unwrap();
        cell.set_border(true);
        cell.set_square(true);

        let mut list = DrawList::new();
        paint_grid(&grid, &mut list).unwrap();

        // clear, cell 0 fill, cell 1 fill + stroke
        assert_eq!(list.ops().len(), 4);
        assert_eq!(
            list.ops()[2],
            DrawOp::Draw {
                shape: Shape::Rect,
                bounds: Rect::new(504.875, 9.875, 885.125, 390.125),
                style: Style::Fill(Argb::BLUE),
            }
        );
        assert_eq!(
            list.ops()[3],
            DrawOp::Draw {
                shape: Shape::Rect,
                bounds: Rect::new(500.0, 5.0, 890.0, 395.0),
                style: Style::Stroke {
                    color: BORDER_COLOR,
                    width: 9.75,
                },
            }
        );
    }

    #[test]
    fn test_canvas_error_stops_painting() {
        let grid = laid_out(3, 3);
        let mut list = DrawList::bounded(4);
        assert_eq!(paint_grid(&grid, &mut list), Err(DrawError::Overflow));
        assert_eq!(list.ops().len(), 4);
        assert_eq!(list.flushes(), 0);
    }

    #[test]
    fn test_invisible_cell_is_transparent() {
        let mut grid = laid_out(1, 1);
        grid.set_visible(false);
        let mut list = DrawList::new();
        paint_grid(&grid, &mut list).unwrap();
        assert!(matches!(
            list.ops()[1],
            DrawOp::Draw {
                style: Style::Fill(Argb::TRANSPARENT),
                ..
            }
        ));
    }
}
