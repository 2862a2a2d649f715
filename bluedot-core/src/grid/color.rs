//! ARGB color values

use bluedot_protocol::{convert_color, ColorError};

/// A 32-bit color, alpha in the top byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Argb(pub u32);

/// Shading applied to a pressed cell
pub const PRESSED_FACTOR: f32 = 0.85;

impl Argb {
    pub const TRANSPARENT: Argb = Argb(0);
    /// Default cell color
    pub const BLUE: Argb = Argb(0xFF00_00FF);

    pub const fn new(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self((alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Parse `#RRGGBB` (opaque) or `#AARRGGBB`
    pub fn from_hex(text: &str) -> Result<Self, ColorError> {
        let digits = text.strip_prefix('#').ok_or(ColorError::InvalidHex)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex);
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidHex)?;
        match digits.len() {
            6 => Ok(Self(0xFF00_0000 | value)),
            8 => Ok(Self(value)),
            _ => Err(ColorError::InvalidHex),
        }
    }

    /// Parse a wire `#RRGGBBAA` color
    pub fn from_wire(text: &str) -> Result<Self, ColorError> {
        Self::from_hex(&convert_color(text)?)
    }

    /// Scale each color channel, keeping alpha
    ///
    /// Channels round half up and saturate at 255.
    pub fn scale(self, factor: f32) -> Self {
        let channel = |c: u8| {
            let scaled = (c as f32 * factor + 0.5) as u32;
            scaled.min(255) as u8
        };
        Self::new(
            self.alpha(),
            channel(self.red()),
            channel(self.green()),
            channel(self.blue()),
        )
    }
}
