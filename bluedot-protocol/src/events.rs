//! Touch operations reported to the server

/// What a finger did to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchOp {
    /// Finger left the cell
    Release,
    /// Finger went down on the cell
    Press,
    /// Finger moved while holding the cell
    Move,
}

// Wire format values
const OP_RELEASE: &str = "0";
const OP_PRESS: &str = "1";
const OP_MOVE: &str = "2";

impl TouchOp {
    /// Parse an operation from its wire field
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            OP_RELEASE => Some(TouchOp::Release),
            OP_PRESS => Some(TouchOp::Press),
            OP_MOVE => Some(TouchOp::Move),
            _ => None,
        }
    }

    /// Convert to wire field
    pub fn code(self) -> &'static str {
        match self {
            TouchOp::Release => OP_RELEASE,
            TouchOp::Press => OP_PRESS,
            TouchOp::Move => OP_MOVE,
        }
    }
}
