//! Pointer tracking
//!
//! Turns raw per-finger input into the minimal press/move/release sequence
//! for the cell each finger holds.
//!
//! # Rules
//!
//! - A press only lands on a cell no other finger is holding
//! - A finger keeps the cell it pressed until it lifts, wherever it moves
//! - A move is reported only when the normalized position changes
//! - Unknown finger ids on move or release are ignored
//!
//! Pointers refer to cells by [`CellId`]; the grid is passed in whenever a
//! cell's pressed flag must change.

mod normalize;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use bluedot_hal::PointerId;
use bluedot_protocol::{TouchMessage, TouchOp};

use crate::grid::{CellId, Grid, Rect};

pub use normalize::{normalize, round4};

/// What a press lands on
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Target {
    pub cell: CellId,
    /// Rectangle coordinates are normalized against
    pub bounds: Rect,
}

/// A touch operation ready to be reported
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    pub op: TouchOp,
    pub cell: CellId,
    pub x: f64,
    pub y: f64,
}

impl TouchEvent {
    /// Build the wire message, with or without the cell address
    pub fn to_message(&self, with_cell: bool) -> TouchMessage {
        TouchMessage {
            op: self.op,
            cell: with_cell.then_some((self.cell.col, self.cell.row)),
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pointer {
    cell: CellId,
    bounds: Rect,
    last_x: f64,
    last_y: f64,
}

/// Active fingers keyed by pointer id
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pointers: BTreeMap<PointerId, Pointer>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            pointers: BTreeMap::new(),
        }
    }

    /// Number of fingers down
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// True if `id` is holding a cell
    pub fn is_active(&self, id: PointerId) -> bool {
        self.pointers.contains_key(&id)
    }

    /// Cell held by `id`
    pub fn cell_of(&self, id: PointerId) -> Option<CellId> {
        self.pointers.get(&id).map(|p| p.cell)
    }

    /// A finger went down on `target`
    ///
    /// Ignored when the cell is already held, does not exist, or `id` is
    /// already tracked.
    pub fn press(
        &mut self,
        grid: &mut Grid,
        target: Target,
        id: PointerId,
        x: f32,
        y: f32,
    ) -> Option<TouchEvent> {
        if self.pointers.contains_key(&id) {
            return None;
        }
        let cell = grid.cell_mut(target.cell)?;
        if cell.is_pressed() {
            return None;
        }
        cell.press();

        let (nx, ny) = normalize(&target.bounds, x, y);
        self.pointers.insert(
            id,
            Pointer {
                cell: target.cell,
                bounds: target.bounds,
                last_x: nx,
                last_y: ny,
            },
        );
        Some(TouchEvent {
            op: TouchOp::Press,
            cell: target.cell,
            x: nx,
            y: ny,
        })
    }

    /// A finger moved
    pub fn move_to(&mut self, id: PointerId, x: f32, y: f32) -> Option<TouchEvent> {
        let pointer = self.pointers.get_mut(&id)?;
        let (nx, ny) = normalize(&pointer.bounds, x, y);
        if nx == pointer.last_x && ny == pointer.last_y {
            return None;
        }
        pointer.last_x = nx;
        pointer.last_y = ny;
        Some(TouchEvent {
            op: TouchOp::Move,
            cell: pointer.cell,
            x: nx,
            y: ny,
        })
    }

    /// A finger lifted
    pub fn release(
        &mut self,
        grid: &mut Grid,
        id: PointerId,
        x: f32,
        y: f32,
    ) -> Option<TouchEvent> {
        let pointer = self.pointers.remove(&id)?;
        if let Some(cell) = grid.cell_mut(pointer.cell) {
            cell.release();
        }
        let (nx, ny) = normalize(&pointer.bounds, x, y);
        Some(TouchEvent {
            op: TouchOp::Release,
            cell: pointer.cell,
            x: nx,
            y: ny,
        })
    }

    /// Lift every finger at its last reported position
    ///
    /// Events come out in pointer id order.
    pub fn release_all(&mut self, grid: &mut Grid) -> Vec<TouchEvent> {
        let pointers = core::mem::take(&mut self.pointers);
        pointers
            .into_values()
            .map(|pointer| {
                if let Some(cell) = grid.cell_mut(pointer.cell) {
                    cell.release();
                }
                TouchEvent {
                    op: TouchOp::Release,
                    cell: pointer.cell,
                    x: pointer.last_x,
                    y: pointer.last_y,
                }
            })
            .collect()
    }

    /// Forget every finger without reporting anything
    pub fn clear(&mut self, grid: &mut Grid) {
        for pointer in core::mem::take(&mut self.pointers).into_values() {
            if let Some(cell) = grid.cell_mut(pointer.cell) {
                cell.release();
            }
        }
    }
}
