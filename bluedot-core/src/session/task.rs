//! Work items for the session

use alloc::vec::Vec;

use bluedot_hal::{LinkState, TouchInput};

/// One unit of work, processed strictly in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// Raw finger input
    Touch(TouchInput),
    /// A chunk read from the link
    Received(Vec<u8>),
    /// The link changed state
    Link(LinkState),
    /// The surface changed size
    Resize { width: u32, height: u32 },
    /// Release everything and stop
    Shutdown,
}
