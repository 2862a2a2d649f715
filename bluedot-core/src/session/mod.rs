//! Session
//!
//! The session owns the grid, the pointer tracker and the inbound decoder,
//! and is the only place they change. Touch input, link reads and link
//! state notices all arrive as [`Task`]s and are handled one at a time, so
//! no state is shared with the threads that produce them.
//!
//! ```text
//!  touch ──┐                         ┌──► Transport::send
//!          ├──► Task ──► Session ────┤
//!  link  ──┘                         └──► Renderer
//! ```

mod task;

use alloc::format;
use alloc::string::String;

use bluedot_hal::{LinkState, TouchInput, Transport};
use bluedot_protocol::{Handshake, LineDecoder};

use crate::command;
use crate::config::{ClientConfig, ConfigError, SurfaceMode};
use crate::grid::{CellId, Grid};
use crate::pointer::{PointerTracker, Target, TouchEvent};
use crate::traits::Renderer;

pub use task::Task;

/// Notice shown when a message is dropped because the link is down
pub const NOT_CONNECTED_NOTICE: &str = "cant send message - not connected";

/// Notice shown when the link refuses a write
pub const SEND_FAILED_NOTICE: &str = "cant send message - link error";

/// Status line while no link is up
pub const NOT_CONNECTED_STATUS: &str = "Not connected";

/// Serialized handler for every [`Task`]
pub struct Session<T: Transport, R: Renderer> {
    transport: T,
    renderer: R,
    grid: Grid,
    pointers: PointerTracker,
    decoder: LineDecoder,
    mode: SurfaceMode,
    client_name: String,
    protocol_version: u8,
    peer: String,
    shown: bool,
}

impl<T: Transport, R: Renderer> Session<T, R> {
    /// Build a session from a configuration
    ///
    /// The surface starts hidden until the link reports connected.
    pub fn new(config: &ClientConfig, transport: T, renderer: R) -> Result<Self, ConfigError> {
        Ok(Self {
            transport,
            renderer,
            grid: config.grid()?,
            pointers: PointerTracker::new(),
            decoder: LineDecoder::new(),
            mode: config.surface.mode,
            client_name: String::from(config.client.name.as_str()),
            protocol_version: config.client.protocol_version,
            peer: String::from(config.link.target()?.name()),
            shown: false,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pointers(&self) -> &PointerTracker {
        &self.pointers
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// True while touches are accepted
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Bytes of an unterminated inbound line
    pub fn pending(&self) -> usize {
        self.decoder.pending()
    }

    /// Handle one task
    ///
    /// Returns `false` once the session has shut down.
    pub fn handle(&mut self, task: Task) -> bool {
        match task {
            Task::Touch(input) => self.on_touch(input),
            Task::Received(chunk) => {
                for line in self.decoder.feed(&chunk) {
                    self.on_line(&line);
                }
            }
            Task::Link(state) => self.on_link(state),
            Task::Resize { width, height } => {
                self.release_all();
                self.grid.layout(width, height);
                self.renderer.redraw(&self.grid);
            }
            Task::Shutdown => {
                self.release_all();
                return false;
            }
        }
        true
    }

    fn on_touch(&mut self, input: TouchInput) {
        match input {
            TouchInput::Down(p) => {
                if !self.shown {
                    return;
                }
                let Some(target) = self.target_at(p.x, p.y) else {
                    return;
                };
                if let Some(event) = self.pointers.press(&mut self.grid, target, p.id, p.x, p.y) {
                    self.report(&event);
                    self.renderer.redraw(&self.grid);
                }
            }
            TouchInput::Move(p) => {
                let area = match self.mode {
                    SurfaceMode::Grid => self.grid.bounds(),
                    SurfaceMode::Button => self.grid.surface_bounds(),
                };
                if !area.contains(p.x, p.y) {
                    return;
                }
                if let Some(event) = self.pointers.move_to(p.id, p.x, p.y) {
                    self.report(&event);
                }
            }
            TouchInput::Up(p) => {
                if let Some(event) = self.pointers.release(&mut self.grid, p.id, p.x, p.y) {
                    self.report(&event);
                    self.renderer.redraw(&self.grid);
                }
            }
        }
    }

    /// What a press at `(x, y)` lands on
    fn target_at(&self, x: f32, y: f32) -> Option<Target> {
        match self.mode {
            SurfaceMode::Grid => {
                let cell = self.grid.hit(x, y)?;
                let bounds = self.grid.cell(cell)?.bounds();
                Some(Target { cell, bounds })
            }
            SurfaceMode::Button => {
                let bounds = self.grid.surface_bounds();
                bounds.contains(x, y).then_some(Target {
                    cell: CellId::ORIGIN,
                    bounds,
                })
            }
        }
    }

    fn on_line(&mut self, line: &str) {
        let outcome = command::process(&mut self.grid, &mut self.pointers, line);
        for event in &outcome.released {
            self.report(event);
        }
        if outcome.error.is_some() {
            self.renderer
                .notify(&format!("Error - Invalid message received '{}'", line));
        }
        if outcome.redraw {
            self.renderer.redraw(&self.grid);
        }
    }

    fn on_link(&mut self, state: LinkState) {
        match state {
            LinkState::Connected => {
                self.renderer
                    .status(&format!("Connected to {}", self.peer));
                self.set_shown(true);
                let handshake = Handshake {
                    protocol_version: self.protocol_version,
                    client_name: &self.client_name,
                }
                .encode();
                self.send_line(&handshake);
            }
            LinkState::Connecting => {
                self.renderer
                    .status(&format!("Connecting to {}", self.peer));
                self.set_shown(false);
            }
            LinkState::Disconnected => {
                self.pointers.clear(&mut self.grid);
                self.decoder.reset();
                self.renderer.status(NOT_CONNECTED_STATUS);
                self.set_shown(false);
            }
        }
    }

    fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
        self.renderer.set_visible(shown);
        if shown {
            self.renderer.redraw(&self.grid);
        }
    }

    fn release_all(&mut self) {
        for event in self.pointers.release_all(&mut self.grid) {
            self.report(&event);
        }
    }

    fn report(&mut self, event: &TouchEvent) {
        let line = event
            .to_message(self.mode == SurfaceMode::Grid)
            .encode();
        self.send_line(&line);
    }

    /// Fire-and-forget write of one encoded line
    fn send_line(&mut self, line: &str) {
        if !self.transport.state().is_connected() {
            self.renderer.notify(NOT_CONNECTED_NOTICE);
            return;
        }
        if line.is_empty() {
            return;
        }
        if self.transport.send(line.as_bytes()).is_err() {
            self.renderer.notify(SEND_FAILED_NOTICE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use bluedot_hal::TouchPoint;

    #[derive(Default)]
    struct FakeLink {
        state: LinkState,
        sent: Vec<String>,
        fail: bool,
    }

    impl Transport for FakeLink {
        type Error = ();

        fn state(&self) -> LinkState {
            self.state
        }

        fn send(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.sent
                .push(String::from_utf8(data.to_vec()).unwrap());
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeScreen {
        redraws: usize,
        visible: bool,
        status: String,
        notices: Vec<String>,
    }

    impl Renderer for FakeScreen {
        fn redraw(&mut self, _grid: &Grid) {
            self.redraws += 1;
        }
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
        fn status(&mut self, text: &str) {
            self.status = String::from(text);
        }
        fn notify(&mut self, text: &str) {
            self.notices.push(String::from(text));
        }
    }

    fn config(mode: SurfaceMode) -> ClientConfig {
        let mut config = ClientConfig::default();
        config.link.device = Some(heapless::String::try_from("/dev/rfcomm0").unwrap());
        config.surface.mode = mode;
        config.surface.cols = 2;
        config.surface.rows = 2;
        // 2x2 cells of 195px starting at (5, 305)
        config.surface.width = 400;
        config.surface.height = 1000;
        config
    }

    fn connected<'a>(
        link: &'a mut FakeLink,
        screen: &'a mut FakeScreen,
        mode: SurfaceMode,
    ) -> Session<&'a mut FakeLink, &'a mut FakeScreen> {
        link.state = LinkState::Connected;
        let mut session = Session::new(&config(mode), link, screen).unwrap();
        session.handle(Task::Link(LinkState::Connected));
        session
    }

    fn down(id: u32, x: f32, y: f32) -> Task {
        Task::Touch(TouchInput::Down(TouchPoint::new(id, x, y)))
    }

    fn moved(id: u32, x: f32, y: f32) -> Task {
        Task::Touch(TouchInput::Move(TouchPoint::new(id, x, y)))
    }

    fn up(id: u32, x: f32, y: f32) -> Task {
        Task::Touch(TouchInput::Up(TouchPoint::new(id, x, y)))
    }

    #[test]
    fn test_connect_sends_handshake_and_shows() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        assert!(session.is_shown());
        drop(session);
        assert_eq!(link.sent, vec![String::from("3,2,Blue Dot Rust client\n")]);
        assert!(screen.visible);
        assert_eq!(screen.status, "Connected to /dev/rfcomm0");
    }

    #[test]
    fn test_grid_touch_sequence() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.handle(down(1, 102.5, 402.5));
        session.handle(moved(1, 102.5, 402.5));
        session.handle(moved(1, 200.0, 305.0));
        session.handle(up(1, 200.0, 305.0));
        drop(session);
        assert_eq!(
            link.sent[1..],
            [
                String::from("1,0,0,0.0,0.0\n"),
                String::from("2,0,0,1.0,1.0\n"),
                String::from("0,0,0,1.0,1.0\n"),
            ]
        );
    }

    #[test]
    fn test_button_mode_omits_cell() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Button);
        session.handle(down(1, 200.0, 500.0));
        session.handle(up(1, 400.0, 0.0));
        drop(session);
        assert_eq!(
            link.sent[1..],
            [String::from("1,0.0,0.0\n"), String::from("0,1.0,1.0\n")]
        );
    }

    #[test]
    fn test_press_ignored_while_hidden() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = Session::new(&config(SurfaceMode::Grid), &mut link, &mut screen).unwrap();
        session.handle(Task::Link(LinkState::Connecting));
        session.handle(down(1, 102.5, 402.5));
        assert!(session.pointers().is_empty());
        drop(session);
        assert!(link.sent.is_empty());
        assert_eq!(screen.status, "Connecting to /dev/rfcomm0");
        assert!(!screen.visible);
    }

    #[test]
    fn test_press_outside_cells_ignored() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.handle(down(1, 200.0, 100.0));
        assert!(session.pointers().is_empty());
    }

    #[test]
    fn test_move_outside_matrix_ignored() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.handle(down(1, 102.5, 402.5));
        session.handle(moved(1, 102.5, 100.0));
        session.handle(up(1, 102.5, 100.0));
        drop(session);
        assert_eq!(link.sent.len(), 3);
        assert!(link.sent[2].starts_with("0,0,0,"));
    }

    #[test]
    fn test_inbound_command_applies_and_redraws() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.handle(Task::Received(b"4,#FF00FF00,1,".to_vec()));
        assert_eq!(session.pending(), 14);
        session.handle(Task::Received(b"1,1,3,3\n".to_vec()));
        assert_eq!((session.grid().cols(), session.grid().rows()), (3, 3));
        assert_eq!(session.pending(), 0);
        let redraws = session.renderer().redraws;
        drop(session);
        assert!(redraws >= 2);
        assert!(screen.notices.is_empty());
    }

    #[test]
    fn test_invalid_message_notice() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.handle(Task::Received(b"9,1,2\n\n".to_vec()));
        drop(session);
        assert_eq!(
            screen.notices,
            vec![
                String::from("Error - Invalid message received '9,1,2'"),
                String::from("Error - Invalid message received ''"),
            ]
        );
    }

    #[test]
    fn test_resize_command_releases_fingers() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.handle(down(4, 297.5, 597.5));
        session.handle(Task::Received(b"4,,,,,1,1\n".to_vec()));
        assert!(session.pointers().is_empty());
        // The finger's later lift is unknown and ignored
        session.handle(up(4, 297.5, 597.5));
        drop(session);
        assert_eq!(
            link.sent[1..],
            [
                String::from("1,1,1,0.0,0.0\n"),
                String::from("0,1,1,0.0,0.0\n"),
            ]
        );
    }

    #[test]
    fn test_surface_resize_releases_fingers() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.handle(down(2, 102.5, 402.5));
        session.handle(Task::Resize {
            width: 1000,
            height: 400,
        });
        assert!(session.pointers().is_empty());
        assert_eq!(session.grid().surface(), (1000, 400));
        drop(session);
        assert_eq!(link.sent.last().unwrap(), "0,0,0,0.0,0.0\n");
    }

    #[test]
    fn test_disconnect_clears_silently() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.handle(down(1, 102.5, 402.5));
        session.handle(Task::Received(b"5,#FF".to_vec()));
        session.handle(Task::Link(LinkState::Disconnected));
        assert!(session.pointers().is_empty());
        assert_eq!(session.pending(), 0);
        assert!(!session.is_shown());
        assert!(session.grid().cells().all(|c| !c.is_pressed()));
        drop(session);
        assert_eq!(link.sent.len(), 2);
        assert_eq!(screen.status, NOT_CONNECTED_STATUS);
    }

    #[test]
    fn test_send_while_disconnected_notifies() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.handle(down(1, 102.5, 402.5));
        drop(session);

        // Link dropped before the notice reached the session
        link.state = LinkState::Disconnected;
        let mut session = Session::new(&config(SurfaceMode::Grid), &mut link, &mut screen).unwrap();
        session.set_shown(true);
        session.handle(down(1, 102.5, 402.5));
        drop(session);
        assert_eq!(link.sent.len(), 2);
        assert_eq!(screen.notices, vec![String::from(NOT_CONNECTED_NOTICE)]);
    }

    #[test]
    fn test_send_failure_notifies() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.transport.fail = true;
        session.handle(down(1, 102.5, 402.5));
        drop(session);
        assert_eq!(screen.notices, vec![String::from(SEND_FAILED_NOTICE)]);
    }

    #[test]
    fn test_shutdown_releases() {
        let mut link = FakeLink::default();
        let mut screen = FakeScreen::default();
        let mut session = connected(&mut link, &mut screen, SurfaceMode::Grid);
        session.handle(down(1, 102.5, 402.5));
        assert!(!session.handle(Task::Shutdown));
        drop(session);
        assert_eq!(link.sent.last().unwrap(), "0,0,0,0.0,0.0\n");
    }
}
