//! Session task
//!
//! The single consumer of the task channel. Everything that touches the
//! grid, the pointers or the link writer happens here, one task at a time.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use tracing::{info, trace};

use bluedot_core::session::{Session, Task};
use bluedot_core::traits::Renderer;
use bluedot_hal::Transport;

use crate::channels::TASKS;
use crate::display::ConsoleRenderer;
use crate::link::SharedLink;

/// The session as wired up by the binary
pub type ClientSession = Session<SharedLink, ConsoleRenderer<std::io::Stdout>>;

/// Drain `tasks` into `session` until it shuts down
pub async fn run_session<M, T, R, const N: usize>(
    tasks: &Channel<M, Task, N>,
    session: &mut Session<T, R>,
) where
    M: RawMutex,
    T: Transport,
    R: Renderer,
{
    loop {
        let task = tasks.receive().await;
        trace!("Task: {:?}", task);
        if !session.handle(task) {
            return;
        }
    }
}

/// Session task - owns the session and exits the process when it ends
#[embassy_executor::task]
pub async fn session_task(mut session: ClientSession) {
    info!("Session task started");
    run_session(&TASKS, &mut session).await;
    info!("Session finished");
    std::process::exit(0);
}
