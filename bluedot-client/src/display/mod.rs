//! Console front-end
//!
//! Presents the surface on a terminal: the grid is painted into a
//! recording canvas (logged at debug level) and previewed as text.

mod console;

pub use console::ConsoleRenderer;
