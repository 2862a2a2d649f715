//! Renderer trait for the touch surface

use crate::grid::Grid;

/// Presents the grid and user-visible notices
///
/// The surface acts as a dumb terminal: the session decides what changes,
/// the renderer only draws it. Rendering failures are the renderer's to
/// report; the session never waits on them.
pub trait Renderer {
    /// Draw every cell of the grid
    fn redraw(&mut self, grid: &Grid);

    /// Show or hide the whole surface
    fn set_visible(&mut self, visible: bool);

    /// Replace the connection status line
    fn status(&mut self, text: &str);

    /// Show a transient notice
    fn notify(&mut self, text: &str);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn redraw(&mut self, grid: &Grid) {
        (**self).redraw(grid)
    }

    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible)
    }

    fn status(&mut self, text: &str) {
        (**self).status(text)
    }

    fn notify(&mut self, text: &str) {
        (**self).notify(text)
    }
}
