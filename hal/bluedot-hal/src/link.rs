//! Byte-stream link abstractions
//!
//! The link is the transport between the touch client and the Blue Dot
//! server. It owns connecting, retrying and tearing down; the core only
//! ever sees its state and hands it bytes to write.

/// Connection state reported by a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No connection and none in progress
    #[default]
    Disconnected,
    /// Connection attempt in progress
    Connecting,
    /// Connected; bytes may be sent
    Connected,
}

impl LinkState {
    /// Returns true if bytes can be sent in this state
    pub fn is_connected(&self) -> bool {
        matches!(self, LinkState::Connected)
    }

    /// Encode as a single byte (for sharing through an atomic)
    pub fn to_u8(self) -> u8 {
        match self {
            LinkState::Disconnected => 0,
            LinkState::Connecting => 1,
            LinkState::Connected => 2,
        }
    }

    /// Decode from a single byte, unknown values read as disconnected
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LinkState::Connecting,
            2 => LinkState::Connected,
            _ => LinkState::Disconnected,
        }
    }
}

/// Outbound half of a byte-stream link
///
/// Sending is fire-and-forget: there is no acknowledgement and no
/// backpressure. Queueing beyond what the link can drain is the link's
/// concern.
pub trait Transport {
    /// Error type for send operations
    type Error: core::fmt::Debug;

    /// Current connection state as seen by the link
    fn state(&self) -> LinkState;

    /// Write all of `data` to the link
    fn send(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn state(&self) -> LinkState {
        (**self).state()
    }

    fn send(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).send(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_byte_roundtrip() {
        for state in [
            LinkState::Disconnected,
            LinkState::Connecting,
            LinkState::Connected,
        ] {
            assert_eq!(LinkState::from_u8(state.to_u8()), state);
        }
    }

    #[test]
    fn test_unknown_byte_is_disconnected() {
        assert_eq!(LinkState::from_u8(0xFF), LinkState::Disconnected);
    }

    #[test]
    fn test_only_connected_can_send() {
        assert!(LinkState::Connected.is_connected());
        assert!(!LinkState::Connecting.is_connected());
        assert!(!LinkState::Disconnected.is_connected());
    }
}
