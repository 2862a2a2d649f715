//! Link thread

use std::io::{self, Read};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{error, info, trace, warn};

use bluedot_core::config::LinkConfig;
use bluedot_core::session::Task;
use bluedot_hal::LinkState;

use super::endpoint::{Connect, Reader, Writer};
use super::SharedLink;
use crate::channels;
use crate::error::ClientError;

/// Connection behaviour taken from `[link]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSettings {
    pub attempts: u8,
    pub retry_delay: Duration,
    /// Bytes requested per read
    pub read_buffer: usize,
}

impl From<&LinkConfig> for LinkSettings {
    fn from(config: &LinkConfig) -> Self {
        Self {
            attempts: config.connect_attempts.max(1),
            retry_delay: Duration::from_millis(u64::from(config.retry_delay_ms)),
            read_buffer: usize::from(config.read_buffer.max(1)),
        }
    }
}

/// Run one connection from first attempt to hang-up
///
/// Every state change is mirrored on `link` before it is posted, so the
/// session never sees `Connected` without a writer in place. Returns once
/// the peer closes or a read fails, or with an error if no attempt
/// succeeds.
pub fn run_link<C, P>(
    link: &SharedLink,
    settings: &LinkSettings,
    endpoint: &C,
    mut post: P,
) -> Result<(), ClientError>
where
    C: Connect + ?Sized,
    P: FnMut(Task),
{
    link.set_state(LinkState::Connecting);
    post(Task::Link(LinkState::Connecting));

    let reader = match connect_with_retry(settings, endpoint) {
        Ok((reader, writer)) => {
            link.attach(writer);
            reader
        }
        Err(source) => {
            link.detach();
            post(Task::Link(LinkState::Disconnected));
            return Err(ClientError::Connect {
                target: endpoint.name().to_owned(),
                attempts: settings.attempts,
                source,
            });
        }
    };

    info!("Connected to {}", endpoint.name());
    post(Task::Link(LinkState::Connected));

    pump(reader, settings.read_buffer, &mut post);

    link.detach();
    post(Task::Link(LinkState::Disconnected));
    Ok(())
}

fn connect_with_retry<C: Connect + ?Sized>(
    settings: &LinkSettings,
    endpoint: &C,
) -> io::Result<(Reader, Writer)> {
    let mut attempt = 1;
    loop {
        info!(
            "Connecting to {} (attempt {}/{})",
            endpoint.name(),
            attempt,
            settings.attempts
        );
        match endpoint.connect() {
            Ok(halves) => return Ok(halves),
            Err(e) if attempt >= settings.attempts => return Err(e),
            Err(e) => {
                warn!("Connect to {} failed: {}", endpoint.name(), e);
                attempt += 1;
                thread::sleep(settings.retry_delay);
            }
        }
    }
}

/// Forward reads until the peer hangs up
fn pump<P: FnMut(Task)>(mut reader: Reader, buffer: usize, post: &mut P) {
    let mut buf = vec![0u8; buffer];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                info!("Link closed by peer");
                return;
            }
            Ok(n) => {
                trace!("RX: {} bytes", n);
                post(Task::Received(buf[..n].to_vec()));
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                warn!("Link read error: {}", e);
                return;
            }
        }
    }
}

/// Start the link thread
///
/// When the connection ends, for whatever reason, the thread posts
/// [`Task::Shutdown`] so the client exits.
pub fn spawn_link<C>(
    endpoint: C,
    settings: LinkSettings,
    link: SharedLink,
) -> io::Result<JoinHandle<()>>
where
    C: Connect + Send + 'static,
{
    thread::Builder::new()
        .name("link".into())
        .spawn(move || {
            if let Err(e) = run_link(&link, &settings, &endpoint, channels::post) {
                error!("{}", e);
            }
            channels::post(Task::Shutdown);
        })
}
