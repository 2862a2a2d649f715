//! Simulated touch input
//!
//! Reads a touch script (see [`parse_line`]) from any buffered reader,
//! normally stdin, and posts the resulting tasks to the session.

mod parse;

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use bluedot_core::session::Task;

use crate::channels;

pub use parse::{parse_line, ScriptError};

/// Feed every line of `input` through `post`
///
/// Bad lines are logged and skipped. Stops after `quit`; end of input is
/// treated the same way.
pub fn run_script<R, P>(input: R, mut post: P) -> io::Result<()>
where
    R: BufRead,
    P: FnMut(Task),
{
    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(tasks) => {
                for task in tasks {
                    let stop = task == Task::Shutdown;
                    debug!("Input: {:?}", task);
                    post(task);
                    if stop {
                        return Ok(());
                    }
                }
            }
            Err(e) => warn!("Ignoring input line '{}': {}", line, e),
        }
    }
    post(Task::Shutdown);
    Ok(())
}

/// Start the stdin input thread
pub fn spawn_stdin() -> io::Result<JoinHandle<()>> {
    thread::Builder::new().name("input".into()).spawn(|| {
        let stdin = io::stdin();
        if let Err(e) = run_script(stdin.lock(), channels::post) {
            warn!("Input read error: {}", e);
            channels::post(Task::Shutdown);
        }
    })
}
