//! Raw touch input
//!
//! Coordinates are in surface pixels, origin at the top-left corner,
//! Y growing downwards. Each physical finger carries a pointer id assigned
//! by the input system that stays unique while the finger is down.

/// Identifier the input system assigns to one finger
pub type PointerId = u32;

/// One finger position
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    /// Finger identifier
    pub id: PointerId,
    /// Horizontal position in pixels
    pub x: f32,
    /// Vertical position in pixels
    pub y: f32,
}

impl TouchPoint {
    pub const fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// A raw touch event
///
/// A batched hardware move (several fingers at once) is delivered as one
/// `Move` per finger, in the order the hardware reported them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchInput {
    /// A finger touched the surface
    Down(TouchPoint),
    /// A finger moved while touching
    Move(TouchPoint),
    /// A finger left the surface
    Up(TouchPoint),
}
