//! Message types for the Blue Dot protocol
//!
//! Message types are divided into two categories:
//! - Client → Server: touch operations, handshake
//! - Server → Client: appearance commands for the whole grid or one cell

use crate::events::TouchOp;
use crate::fields::{split_fields, Fields};
use crate::frame::LINE_TERMINATOR;
use alloc::string::String;
use core::fmt::Write;

// Operation codes: Client → Server (touch ops live in `events`)
pub const MSG_HANDSHAKE: &str = "3";

// Operation codes: Server → Client
pub const MSG_SET_MATRIX: &str = "4";
pub const MSG_SET_CELL: &str = "5";

/// Protocol version announced in the handshake
pub const PROTOCOL_VERSION: u8 = 2;

/// Longest client name the handshake carries, in bytes
pub const MAX_CLIENT_NAME_LEN: usize = 32;

/// Largest grid dimension accepted from the server
pub const MAX_DIMENSION: u16 = 255;

/// Field count of both server commands, op included
const COMMAND_FIELDS: usize = 7;

/// Errors that can occur parsing a protocol line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// First field is not a known operation
    UnknownOp,
    /// Wrong number of fields for the operation
    FieldCount { expected: usize, found: usize },
    /// A numeric field is empty or not a number
    InvalidNumber,
    /// A grid dimension above [`MAX_DIMENSION`]
    DimensionTooLarge,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::UnknownOp => write!(f, "unknown operation"),
            ParseError::FieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
            ParseError::InvalidNumber => write!(f, "invalid number"),
            ParseError::DimensionTooLarge => {
                write!(f, "dimension larger than {}", MAX_DIMENSION)
            }
        }
    }
}

/// Value of the `visible` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Visibility {
    /// Exactly `"0"`: hide and ignore every other appearance field
    Hide,
    /// Any other non-empty value; `"1"` shows
    Set(bool),
}

impl Visibility {
    /// Resulting visibility flag
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Set(true))
    }
}

/// Appearance fields shared by both server commands
///
/// `None` means the field was empty and the target keeps its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Appearance<'a> {
    /// Wire color `#RRGGBBAA`, not yet validated
    pub color: Option<&'a str>,
    pub square: Option<bool>,
    pub border: Option<bool>,
    pub visible: Option<Visibility>,
}

impl<'a> Appearance<'a> {
    fn from_fields(fields: &Fields<'a>) -> Self {
        let field = |i| fields.get(i).filter(|s: &&str| !s.is_empty());
        Self {
            color: field(1),
            square: field(2).map(|s| s == "1"),
            border: field(3).map(|s| s == "1"),
            visible: field(4).map(|s| match s {
                "0" => Visibility::Hide,
                other => Visibility::Set(other == "1"),
            }),
        }
    }

    /// True when the command only hides its target
    pub fn hides(&self) -> bool {
        matches!(self.visible, Some(Visibility::Hide))
    }
}

/// Commands parsed from server lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand<'a> {
    /// Reconfigure every cell, optionally resizing first
    SetMatrix {
        appearance: Appearance<'a>,
        cols: Option<u16>,
        rows: Option<u16>,
    },
    /// Reconfigure one cell
    ///
    /// The address is kept signed; whether it exists is the grid's call.
    SetCell {
        appearance: Appearance<'a>,
        col: i32,
        row: i32,
    },
}

impl<'a> HostCommand<'a> {
    /// Parse a command from one line, without its terminator
    ///
    /// Numbers are checked here, so a malformed line is rejected before it
    /// can touch any state.
    pub fn parse(line: &'a str) -> Result<Self, ParseError> {
        let fields = split_fields(line);
        match fields.get(0) {
            Some(MSG_SET_MATRIX) => {
                expect_fields(&fields, COMMAND_FIELDS)?;
                Ok(HostCommand::SetMatrix {
                    appearance: Appearance::from_fields(&fields),
                    cols: parse_dimension(fields.get(5))?,
                    rows: parse_dimension(fields.get(6))?,
                })
            }
            Some(MSG_SET_CELL) => {
                expect_fields(&fields, COMMAND_FIELDS)?;
                Ok(HostCommand::SetCell {
                    appearance: Appearance::from_fields(&fields),
                    col: parse_int(fields.get(5))?,
                    row: parse_int(fields.get(6))?,
                })
            }
            _ => Err(ParseError::UnknownOp),
        }
    }

    /// The appearance fields of either command
    pub fn appearance(&self) -> &Appearance<'a> {
        match self {
            HostCommand::SetMatrix { appearance, .. } | HostCommand::SetCell { appearance, .. } => {
                appearance
            }
        }
    }
}

fn expect_fields(fields: &Fields<'_>, expected: usize) -> Result<(), ParseError> {
    if fields.count() != expected {
        return Err(ParseError::FieldCount {
            expected,
            found: fields.count(),
        });
    }
    Ok(())
}

fn parse_int(field: Option<&str>) -> Result<i32, ParseError> {
    field
        .and_then(|s| s.parse::<i32>().ok())
        .ok_or(ParseError::InvalidNumber)
}

/// Empty means unchanged; values below 1 clamp to 1
fn parse_dimension(field: Option<&str>) -> Result<Option<u16>, ParseError> {
    match field {
        None | Some("") => Ok(None),
        some => {
            let value = parse_int(some)?;
            if value > MAX_DIMENSION as i32 {
                return Err(ParseError::DimensionTooLarge);
            }
            Ok(Some(value.max(1) as u16))
        }
    }
}

/// Append a normalized coordinate in wire form
///
/// Integral values keep a trailing `.0` (`1.0`, `-1.0`); others use the
/// shortest representation that reads back to the same value.
pub fn write_coordinate(out: &mut String, value: f64) {
    // Out-of-range and non-finite values fall through to Display
    let integral = value > -1e15 && value < 1e15 && value == (value as i64) as f64;
    let _ = if integral {
        write!(out, "{:.1}", value)
    } else {
        write!(out, "{}", value)
    };
}

/// A press, move or release report
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchMessage {
    pub op: TouchOp,
    /// `(col, row)` in grid mode, `None` in single-button mode
    pub cell: Option<(u16, u16)>,
    /// Normalized coordinates, -1.0..=1.0 inside the target
    pub x: f64,
    pub y: f64,
}

impl TouchMessage {
    /// Encode this message into one terminated line
    pub fn encode(&self) -> String {
        let mut line = String::new();
        line.push_str(self.op.code());
        if let Some((col, row)) = self.cell {
            let _ = write!(line, ",{},{}", col, row);
        }
        line.push(',');
        write_coordinate(&mut line, self.x);
        line.push(',');
        write_coordinate(&mut line, self.y);
        line.push(LINE_TERMINATOR as char);
        line
    }

    /// Parse a message from a line (for testing or simulation)
    ///
    /// Five fields carry a cell address, three do not.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.strip_suffix(LINE_TERMINATOR as char).unwrap_or(line);
        let fields = split_fields(line);
        let op = fields
            .get(0)
            .and_then(TouchOp::from_code)
            .ok_or(ParseError::UnknownOp)?;

        let coord = |i: usize| {
            fields
                .get(i)
                .and_then(|s| s.parse::<f64>().ok())
                .ok_or(ParseError::InvalidNumber)
        };
        let index = |i: usize| {
            fields
                .get(i)
                .and_then(|s| s.parse::<u16>().ok())
                .ok_or(ParseError::InvalidNumber)
        };

        match fields.count() {
            3 => Ok(Self {
                op,
                cell: None,
                x: coord(1)?,
                y: coord(2)?,
            }),
            5 => Ok(Self {
                op,
                cell: Some((index(1)?, index(2)?)),
                x: coord(3)?,
                y: coord(4)?,
            }),
            found => Err(ParseError::FieldCount { expected: 5, found }),
        }
    }
}

/// Handshake sent once when the link comes up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Handshake<'a> {
    pub protocol_version: u8,
    pub client_name: &'a str,
}

impl<'a> Handshake<'a> {
    pub fn new(client_name: &'a str) -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            client_name,
        }
    }

    /// Encode into one terminated line
    pub fn encode(&self) -> String {
        let mut line = String::new();
        let _ = write!(
            line,
            "{},{},{}",
            MSG_HANDSHAKE, self.protocol_version, self.client_name
        );
        line.push(LINE_TERMINATOR as char);
        line
    }

    /// Parse a handshake line (for testing or simulation)
    pub fn parse(line: &'a str) -> Result<Self, ParseError> {
        let line = line.strip_suffix(LINE_TERMINATOR as char).unwrap_or(line);
        let fields = split_fields(line);
        if fields.get(0) != Some(MSG_HANDSHAKE) {
            return Err(ParseError::UnknownOp);
        }
        expect_fields(&fields, 3)?;
        let protocol_version = fields
            .get(1)
            .and_then(|s| s.parse::<u8>().ok())
            .ok_or(ParseError::InvalidNumber)?;
        Ok(Self {
            protocol_version,
            client_name: fields.get(2).unwrap_or(""),
        })
    }
}
