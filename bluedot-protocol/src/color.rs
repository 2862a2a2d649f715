//! Wire color conversion
//!
//! Colors travel as `#RRGGBBAA` (alpha last). Locally they are kept as
//! `#AARRGGBB` (alpha first). Conversion is pure string surgery: the `#`,
//! then characters 7..9, then characters 1..7. Nothing is validated as hex
//! here; characters past index 9 are ignored.

use heapless::String;

/// Length of a complete wire color, including the leading `#`
pub const WIRE_COLOR_LEN: usize = 9;

/// Errors that can occur converting a wire color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorError {
    /// Fewer than nine bytes
    TooShort,
    /// A slice boundary falls inside a multi-byte character
    Malformed,
    /// Not a hex color once reordered
    InvalidHex,
}

impl core::fmt::Display for ColorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ColorError::TooShort => write!(f, "color shorter than {} characters", WIRE_COLOR_LEN),
            ColorError::Malformed => write!(f, "color splits a multi-byte character"),
            ColorError::InvalidHex => write!(f, "color is not hexadecimal"),
        }
    }
}

/// Reorder a wire `#RRGGBBAA` color into `#AARRGGBB`
pub fn convert_color(wire: &str) -> Result<String<WIRE_COLOR_LEN>, ColorError> {
    if wire.len() < WIRE_COLOR_LEN {
        return Err(ColorError::TooShort);
    }

    let (Some(hash), Some(alpha), Some(rgb)) = (wire.get(0..1), wire.get(7..9), wire.get(1..7))
    else {
        return Err(ColorError::Malformed);
    };

    let mut out = String::new();
    for part in [hash, alpha, rgb] {
        out.push_str(part).map_err(|_| ColorError::Malformed)?;
    }
    Ok(out)
}
