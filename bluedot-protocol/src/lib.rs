//! Blue Dot Wire Protocol
//!
//! This crate defines the text protocol spoken between a Blue Dot touch
//! client and the server it remote-controls. The protocol is designed for
//! simplicity and for links that deliver bytes in arbitrary chunks.
//!
//! # Protocol Overview
//!
//! Every message is one line of comma-separated ASCII fields terminated by
//! `\n`. The first field is the operation code:
//! ```text
//! ┌────┬───────────┬──────────────────────────────────────────┐
//! │ OP │ DIRECTION │ FIELDS                                   │
//! ├────┼───────────┼──────────────────────────────────────────┤
//! │ 0  │ out       │ [col,row,]x,y          release           │
//! │ 1  │ out       │ [col,row,]x,y          press             │
//! │ 2  │ out       │ [col,row,]x,y          move              │
//! │ 3  │ out       │ version,client_name    handshake         │
//! │ 4  │ in        │ color,square,border,visible,cols,rows    │
//! │ 5  │ in        │ color,square,border,visible,col,row      │
//! └────┴───────────┴──────────────────────────────────────────┘
//! ```
//!
//! The client is a "dumb terminal": it reports where fingers are and
//! paints what it is told. All behaviour lives on the server.

// std is linked for tests so proptest can run
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod color;
pub mod events;
pub mod fields;
pub mod frame;
pub mod messages;

pub use color::{convert_color, ColorError, WIRE_COLOR_LEN};
pub use events::TouchOp;
pub use fields::{split_fields, Fields};
pub use frame::{LineDecoder, LINE_TERMINATOR};
pub use messages::{
    Appearance, Handshake, HostCommand, ParseError, TouchMessage, Visibility, MAX_CLIENT_NAME_LEN,
    MAX_DIMENSION, PROTOCOL_VERSION,
};
