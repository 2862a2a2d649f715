//! Line framing for the Blue Dot protocol.
//!
//! The link delivers bytes in arbitrary chunks: a message may arrive split
//! across several reads and one read may carry several messages. Framing is
//! a single `\n` after each message, nothing else.
//!
//! Decoding keeps raw bytes until a terminator is seen, so a multi-byte
//! character split across chunks is reassembled before it is decoded.

use alloc::string::String;
use alloc::vec::Vec;

/// Message terminator
pub const LINE_TERMINATOR: u8 = b'\n';

/// Accumulates chunks and yields complete lines
///
/// After every [`feed`](LineDecoder::feed) the buffer holds only the bytes
/// after the last terminator, so it never contains a complete message.
/// There is no upper bound on how much a partial line may grow.
#[derive(Debug, Clone, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
}

impl LineDecoder {
    /// Create an empty decoder
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Append a chunk and return every line it completed, in order
    ///
    /// Returned lines do not include the terminator. Each line is decoded as
    /// UTF-8, with invalid sequences replaced by U+FFFD.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let Some(last) = self.buffer.iter().rposition(|&b| b == LINE_TERMINATOR) else {
            return Vec::new();
        };

        let complete: Vec<u8> = self.buffer.drain(..=last).collect();
        complete[..last]
            .split(|&b| b == LINE_TERMINATOR)
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    /// Number of buffered bytes not yet terminated
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Drop the partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
