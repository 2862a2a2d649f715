//! Console renderer

use std::io::{self, Stdout, Write};

use tracing::{debug, info, warn};

use bluedot_core::grid::Grid;
use bluedot_core::traits::Renderer;
use bluedot_display::{paint_grid, DrawList, TextScreen};

/// Text renderer writing to any byte sink
///
/// Status lines and notices are always written; the grid preview only
/// while the surface is visible.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    canvas: DrawList,
    screen: TextScreen,
    visible: bool,
}

impl ConsoleRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            canvas: DrawList::new(),
            screen: TextScreen::new(),
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Draw calls from the most recent paint
    pub fn canvas(&self) -> &DrawList {
        &self.canvas
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn present(&mut self) {
        if !self.visible || !self.screen.is_dirty() {
            return;
        }
        let mut frame = String::new();
        for line in self.screen.lines() {
            frame.push_str(line);
            frame.push('\n');
        }
        self.emit(&frame);
        self.screen.mark_clean();
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("Console write failed: {}", e);
        }
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn redraw(&mut self, grid: &Grid) {
        self.canvas.take();
        match paint_grid(grid, &mut self.canvas) {
            Ok(()) => debug!(
                "Painted {}x{} grid ({} ops)",
                grid.cols(),
                grid.rows(),
                self.canvas.ops().len()
            ),
            Err(e) => warn!("Paint failed: {}", e),
        }
        self.screen.update(grid);
        self.present();
    }

    fn set_visible(&mut self, visible: bool) {
        debug!("Surface {}", if visible { "shown" } else { "hidden" });
        self.visible = visible;
    }

    fn status(&mut self, text: &str) {
        info!("{}", text);
        self.emit(&format!("-- {} --\n", text));
    }

    fn notify(&mut self, text: &str) {
        warn!("{}", text);
        self.emit(&format!("! {}\n", text));
    }
}
