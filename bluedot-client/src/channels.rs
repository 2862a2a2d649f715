//! Inter-task communication channels
//!
//! Every producer (link reader thread, touch input thread, the executor's
//! own tasks) posts into one bounded channel; the session task is its only
//! consumer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use bluedot_core::session::Task;

/// Channel capacity for session tasks
pub const TASK_CHANNEL_SIZE: usize = 32;

/// Work for the session, in arrival order
pub static TASKS: Channel<CriticalSectionRawMutex, Task, TASK_CHANNEL_SIZE> = Channel::new();

/// Post a task from a plain thread, waiting while the channel is full
pub fn post(task: Task) {
    embassy_futures::block_on(TASKS.send(task));
}
