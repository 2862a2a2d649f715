//! Embassy async tasks
//!
//! Only the session runs on the executor. The link and input threads block
//! on I/O and reach it through [`crate::channels::TASKS`].

pub mod session;

pub use session::{run_session, session_task, ClientSession};
