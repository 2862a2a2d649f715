//! Recording canvas
//!
//! Stores canvas calls instead of executing them. Used by front-ends that
//! ship draw commands elsewhere, and by tests.

use alloc::vec::Vec;

use bluedot_core::grid::{Argb, Rect};

use crate::backend::{Canvas, DrawError, Shape, Style};

/// One recorded canvas call
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawOp {
    Clear(Argb),
    Draw {
        shape: Shape,
        bounds: Rect,
        style: Style,
    },
}

/// Canvas that records every call
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    ops: Vec<DrawOp>,
    flushes: usize,
    /// Maximum recorded calls, unbounded if `None`
    limit: Option<usize>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list that refuses calls past `limit`
    pub fn bounded(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    fn record(&mut self, op: DrawOp) -> Result<(), DrawError> {
        if self.limit.is_some_and(|limit| self.ops.len() >= limit) {
            return Err(DrawError::Overflow);
        }
        self.ops.push(op);
        Ok(())
    }

    /// Calls since the last clear
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of flushes so far
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Take the recorded calls, leaving the list empty
    pub fn take(&mut self) -> Vec<DrawOp> {
        core::mem::take(&mut self.ops)
    }
}

impl Canvas for DrawList {
    /// Clearing drops everything recorded before it
    fn clear(&mut self, color: Argb) -> Result<(), DrawError> {
        self.ops.clear();
        self.record(DrawOp::Clear(color))
    }

    fn draw(&mut self, shape: Shape, bounds: Rect, style: Style) -> Result<(), DrawError> {
        self.record(DrawOp::Draw {
            shape,
            bounds,
            style,
        })
    }

    fn flush(&mut self) -> Result<(), DrawError> {
        self.flushes += 1;
        Ok(())
    }
}
