//! Command processing
//!
//! Applies server commands to the grid with a "blank field leaves it
//! unchanged" merge:
//!
//! 1. A `SetMatrix` with a size resizes first, releasing every finger
//! 2. `visible == "0"` hides the target and nothing else is applied
//! 3. Otherwise color, square, border and visible apply independently
//!
//! A color that does not parse marks the command invalid but the remaining
//! fields still apply; nothing already applied is rolled back.

use alloc::vec::Vec;

use bluedot_protocol::{Appearance, ColorError, HostCommand, ParseError};

use crate::grid::{Argb, Cell, Grid};
use crate::pointer::{PointerTracker, TouchEvent};

/// Why a command was reported invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line did not parse; nothing was applied
    Parse(ParseError),
    /// Color field rejected; other fields were applied
    Color(ColorError),
    /// `SetCell` addressed a cell outside the grid; nothing was applied
    UnknownCell { col: i32, row: i32 },
}

impl From<ParseError> for CommandError {
    fn from(e: ParseError) -> Self {
        CommandError::Parse(e)
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::Parse(e) => write!(f, "{}", e),
            CommandError::Color(e) => write!(f, "{}", e),
            CommandError::UnknownCell { col, row } => {
                write!(f, "no cell at {},{}", col, row)
            }
        }
    }
}

/// Result of processing one line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// Releases for fingers dropped by a resize, to be reported
    pub released: Vec<TouchEvent>,
    /// The grid changed and should be redrawn
    pub redraw: bool,
    pub error: Option<CommandError>,
}

impl Outcome {
    fn rejected(error: CommandError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Something appearance fields can be applied to
trait Styled {
    fn set_color(&mut self, color: Argb);
    fn set_square(&mut self, square: bool);
    fn set_border(&mut self, border: bool);
    fn set_visible(&mut self, visible: bool);
}

impl Styled for Grid {
    fn set_color(&mut self, color: Argb) {
        Grid::set_color(self, color)
    }
    fn set_square(&mut self, square: bool) {
        Grid::set_square(self, square)
    }
    fn set_border(&mut self, border: bool) {
        Grid::set_border(self, border)
    }
    fn set_visible(&mut self, visible: bool) {
        Grid::set_visible(self, visible)
    }
}

impl Styled for Cell {
    fn set_color(&mut self, color: Argb) {
        Cell::set_color(self, color)
    }
    fn set_square(&mut self, square: bool) {
        Cell::set_square(self, square)
    }
    fn set_border(&mut self, border: bool) {
        Cell::set_border(self, border)
    }
    fn set_visible(&mut self, visible: bool) {
        Cell::set_visible(self, visible)
    }
}

fn apply_appearance<T: Styled>(
    target: &mut T,
    appearance: &Appearance<'_>,
) -> Option<CommandError> {
    if appearance.hides() {
        target.set_visible(false);
        return None;
    }

    let mut error = None;
    if let Some(wire) = appearance.color {
        match Argb::from_wire(wire) {
            Ok(color) => target.set_color(color),
            Err(e) => error = Some(CommandError::Color(e)),
        }
    }
    if let Some(square) = appearance.square {
        target.set_square(square);
    }
    if let Some(border) = appearance.border {
        target.set_border(border);
    }
    if let Some(visible) = appearance.visible {
        target.set_visible(visible.is_visible());
    }
    error
}

/// Apply a parsed command
pub fn apply(grid: &mut Grid, pointers: &mut PointerTracker, command: &HostCommand<'_>) -> Outcome {
    match command {
        HostCommand::SetMatrix {
            appearance,
            cols,
            rows,
        } => {
            let mut released = Vec::new();
            if cols.is_some() || rows.is_some() {
                released = pointers.release_all(grid);
                grid.set_size(cols.unwrap_or(grid.cols()), rows.unwrap_or(grid.rows()));
            }
            let error = apply_appearance(grid, appearance);
            Outcome {
                released,
                redraw: true,
                error,
            }
        }
        HostCommand::SetCell {
            appearance,
            col,
            row,
        } => {
            let Some(cell) = grid.lookup(*col, *row).and_then(|id| grid.cell_mut(id)) else {
                return Outcome::rejected(CommandError::UnknownCell {
                    col: *col,
                    row: *row,
                });
            };
            let error = apply_appearance(cell, appearance);
            Outcome {
                released: Vec::new(),
                redraw: true,
                error,
            }
        }
    }
}

/// Parse and apply one inbound line
pub fn process(grid: &mut Grid, pointers: &mut PointerTracker, line: &str) -> Outcome {
    match HostCommand::parse(line) {
        Ok(command) => apply(grid, pointers, &command),
        Err(e) => Outcome::rejected(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellId, Rect};
    use crate::pointer::Target;
    use bluedot_protocol::TouchOp;

    #[test]
    fn test_set_matrix_full() {
        let mut grid = Grid::new(1, 1);
        let mut pointers = PointerTracker::new();
        let outcome = process(&mut grid, &mut pointers, "4,#FF00FF00,1,1,1,3,3");
        assert_eq!(outcome.error, None);
        assert!(outcome.redraw);
        assert_eq!((grid.cols(), grid.rows()), (3, 3));
        assert!(grid.cells().all(|c| {
            c.color() == Argb(0x00FF_00FF) && c.square() && c.border() && c.visible()
        }));
    }

    #[test]
    fn test_hide_short_circuits() {
        let mut grid = Grid::new(1, 1);
        grid.set_square(true);
        let mut pointers = PointerTracker::new();
        let outcome = process(&mut grid, &mut pointers, "4,#FF0000FF,0,1,0,5,4");
        assert_eq!(outcome.error, None);
        assert_eq!((grid.cols(), grid.rows()), (5, 4));
        assert!(!grid.visible());
        // Resize reset square; color and border were not applied
        assert!(grid
            .cells()
            .all(|c| !c.visible() && !c.square() && !c.border() && c.color() == Argb::BLUE));
    }

    #[test]
    fn test_blank_fields_unchanged() {
        let mut grid = Grid::new(2, 2);
        grid.set_border(true);
        let mut pointers = PointerTracker::new();
        let outcome = process(&mut grid, &mut pointers, "4,,1,,,,");
        assert_eq!(outcome.error, None);
        assert_eq!((grid.cols(), grid.rows()), (2, 2));
        assert!(grid.cells().all(|c| c.square() && c.border()));
    }

    #[test]
    fn test_single_dimension_resize() {
        let mut grid = Grid::new(2, 3);
        let mut pointers = PointerTracker::new();
        process(&mut grid, &mut pointers, "4,,,,,4,");
        assert_eq!((grid.cols(), grid.rows()), (4, 3));
    }

    #[test]
    fn test_bad_color_still_applies_rest() {
        let mut grid = Grid::new(2, 2);
        let mut pointers = PointerTracker::new();
        let outcome = process(&mut grid, &mut pointers, "5,#F00,1,1,,1,0");
        assert_eq!(
            outcome.error,
            Some(CommandError::Color(ColorError::TooShort))
        );
        let cell = grid.cell(CellId::new(1, 0)).unwrap();
        assert!(cell.square() && cell.border());
        assert_eq!(cell.color(), Argb::BLUE);
    }

    #[test]
    fn test_set_cell() {
        let mut grid = Grid::new(2, 2);
        let mut pointers = PointerTracker::new();
        let outcome = process(&mut grid, &mut pointers, "5,#00FF0080,,,2,0,1");
        assert_eq!(outcome.error, None);
        let cell = grid.cell(CellId::new(0, 1)).unwrap();
        assert_eq!(cell.color(), Argb(0x8000_FF00));
        assert!(!cell.visible());
        assert!(grid.cell(CellId::new(0, 0)).unwrap().visible());
    }

    #[test]
    fn test_set_cell_out_of_range() {
        let mut grid = Grid::new(2, 2);
        let before = grid.clone();
        let mut pointers = PointerTracker::new();
        let outcome = process(&mut grid, &mut pointers, "5,,1,,,2,0");
        assert_eq!(
            outcome.error,
            Some(CommandError::UnknownCell { col: 2, row: 0 })
        );
        assert!(!outcome.redraw);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_invalid_line_does_not_mutate() {
        let mut grid = Grid::new(2, 2);
        let before = grid.clone();
        let mut pointers = PointerTracker::new();
        for line in ["9,1,2", "", "4,,,,,x,1", "5,,,,,0"] {
            let outcome = process(&mut grid, &mut pointers, line);
            assert!(matches!(outcome.error, Some(CommandError::Parse(_))));
            assert!(!outcome.redraw);
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn test_resize_releases_fingers() {
        let mut grid = Grid::new(2, 2);
        grid.layout(400, 1000);
        let mut pointers = PointerTracker::new();
        let cell = CellId::new(1, 1);
        let bounds = grid.cell(cell).unwrap().bounds();
        pointers.press(&mut grid, Target { cell, bounds }, 5, 297.5, 597.5);

        let outcome = process(&mut grid, &mut pointers, "4,,,,,1,1");
        assert_eq!(outcome.released.len(), 1);
        assert_eq!(outcome.released[0].op, TouchOp::Release);
        assert_eq!(outcome.released[0].cell, cell);
        assert!(pointers.is_empty());
        assert_ne!(grid.bounds(), Rect::EMPTY);
    }

    #[test]
    fn test_appearance_only_keeps_fingers() {
        let mut grid = Grid::new(1, 1);
        grid.layout(100, 100);
        let mut pointers = PointerTracker::new();
        let bounds = grid.cell(CellId::ORIGIN).unwrap().bounds();
        pointers.press(
            &mut grid,
            Target {
                cell: CellId::ORIGIN,
                bounds,
            },
            1,
            50.0,
            50.0,
        );
        let outcome = process(&mut grid, &mut pointers, "4,#FFFFFFFF,,,,,");
        assert!(outcome.released.is_empty());
        assert_eq!(pointers.len(), 1);
        // Recolor while held keeps the pressed shade
        assert_eq!(
            grid.cell(CellId::ORIGIN).unwrap().color(),
            Argb::new(0xFF, 217, 217, 217)
        );
    }
}
