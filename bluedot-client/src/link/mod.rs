//! Byte-stream link to the Blue Dot server
//!
//! The link runs on its own thread: it connects (retrying), then blocks on
//! reads and posts every chunk to the session. The session writes through
//! a [`SharedLink`] handle, which holds the write half while connected.
//!
//! ```text
//!            ┌──────── link thread ────────┐
//!  server ──►│ read ──► Task::Received ────┼──► TASKS
//!            │ state ─► Task::Link     ────┼──►
//!            └─────────────────────────────┘
//!  server ◄── SharedLink::send ◄── Session
//! ```

mod endpoint;
mod worker;

use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use bluedot_hal::{LinkState, Transport};

pub use endpoint::{Connect, Endpoint, Reader, Writer};
pub use worker::{run_link, spawn_link, LinkSettings};

#[derive(Default)]
struct Inner {
    state: AtomicU8,
    writer: Mutex<Option<Writer>>,
}

/// Session-side handle to the link
///
/// Clones share the same connection.
#[derive(Clone, Default)]
pub struct SharedLink {
    inner: Arc<Inner>,
}

impl SharedLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_state(&self, state: LinkState) {
        self.inner.state.store(state.to_u8(), Ordering::Release);
    }

    /// Install the write half and mark the link connected
    pub fn attach(&self, writer: Writer) {
        *self.inner.writer.lock() = Some(writer);
        self.set_state(LinkState::Connected);
    }

    /// Drop the write half and mark the link disconnected
    pub fn detach(&self) {
        self.set_state(LinkState::Disconnected);
        self.inner.writer.lock().take();
    }
}

impl Transport for SharedLink {
    type Error = io::Error;

    fn state(&self) -> LinkState {
        LinkState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    fn send(&mut self, data: &[u8]) -> Result<(), io::Error> {
        let mut writer = self.inner.writer.lock();
        let Some(writer) = writer.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "link not attached"));
        };
        let result = writer.write_all(data).and_then(|_| writer.flush());
        if let Err(e) = &result {
            warn!("Link write failed: {}", e);
        }
        result
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Write half that records into a shared buffer
    #[derive(Clone, Default)]
    pub(crate) struct Capture(pub Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        pub(crate) fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_send_requires_writer() {
        let mut link = SharedLink::new();
        assert_eq!(link.state(), LinkState::Disconnected);
        let err = link.send(b"1,0,0,0.0,0.0\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[test]
    fn test_attach_send_detach() {
        let capture = Capture::default();
        let mut link = SharedLink::new();
        let session_side = link.clone();

        link.attach(Box::new(capture.clone()));
        assert_eq!(session_side.state(), LinkState::Connected);
        link.send(b"3,2,test\n").unwrap();
        assert_eq!(capture.text(), "3,2,test\n");

        link.detach();
        assert_eq!(session_side.state(), LinkState::Disconnected);
        assert!(link.send(b"x").is_err());
    }

    #[test]
    fn test_write_error_is_returned() {
        let mut link = SharedLink::new();
        link.attach(Box::new(Broken));
        let err = link.send(b"1\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        // The state is owned by the reader side
        assert_eq!(link.state(), LinkState::Connected);
    }
}
