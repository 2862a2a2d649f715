//! Coordinate normalization
//!
//! A point is reported relative to the centre of its target: `-1.0` at the
//! left/bottom edge, `1.0` at the right/top edge (Y grows upwards). Values
//! are not clamped, so a finger dragged outside its cell reports beyond
//! ±1.

use crate::grid::Rect;

/// Round half toward positive infinity at four decimals
///
/// The result is never `-0.0`.
pub fn round4(value: f64) -> f64 {
    floor(value * 10_000.0 + 0.5) / 10_000.0
}

/// `floor` without libm; exact for the magnitudes a surface produces
fn floor(value: f64) -> f64 {
    if !(value > i64::MIN as f64 && value < i64::MAX as f64) {
        return value;
    }
    let truncated = value as i64;
    let floored = if (truncated as f64) > value {
        truncated - 1
    } else {
        truncated
    };
    floored as f64
}

/// Normalize a surface point against `bounds`
///
/// An axis of zero extent normalizes to `0.0`.
pub fn normalize(bounds: &Rect, x: f32, y: f32) -> (f64, f64) {
    let half_w = bounds.width() as f64 / 2.0;
    let half_h = bounds.height() as f64 / 2.0;

    let nx = if half_w > 0.0 {
        round4((x as f64 - bounds.left as f64 - half_w) / half_w)
    } else {
        0.0
    };
    let ny = if half_h > 0.0 {
        round4(-(y as f64 - bounds.top as f64 - half_h) / half_h)
    } else {
        0.0
    };
    (nx, ny)
}
