//! Configuration type definitions

use heapless::String;

use bluedot_protocol::{ColorError, MAX_CLIENT_NAME_LEN, MAX_DIMENSION, PROTOCOL_VERSION};

use crate::grid::{Argb, Grid, DEFAULT_BORDER_THICKNESS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum length of a link address or device path
pub const MAX_TARGET_LEN: usize = 64;

/// Client name announced in the handshake unless configured
pub const DEFAULT_CLIENT_NAME: &str = "Blue Dot Rust client";

/// Default wire color (`#RRGGBBAA`), opaque blue
pub const DEFAULT_COLOR: &str = "#0000FFFF";

/// Errors found validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Client name is empty
    EmptyName,
    /// Client name contains a comma or line break
    InvalidName,
    /// Grid dimension outside 1..=MAX_DIMENSION
    InvalidSize,
    /// Border thickness outside 0.0..0.5
    InvalidThickness,
    /// Default color does not parse
    InvalidColor(ColorError),
    /// Neither an address nor a device is set
    NoLinkTarget,
    /// Both an address and a device are set
    AmbiguousLinkTarget,
    /// Zero connect attempts or a zero-sized read buffer
    InvalidLinkSettings,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyName => write!(f, "client name is empty"),
            ConfigError::InvalidName => {
                write!(f, "client name must not contain commas or line breaks")
            }
            ConfigError::InvalidSize => {
                write!(f, "cols and rows must be between 1 and {}", MAX_DIMENSION)
            }
            ConfigError::InvalidThickness => {
                write!(f, "border_thickness must be at least 0.0 and below 0.5")
            }
            ConfigError::InvalidColor(e) => write!(f, "default_color: {}", e),
            ConfigError::NoLinkTarget => write!(f, "no link address or device configured"),
            ConfigError::AmbiguousLinkTarget => {
                write!(f, "set either a link address or a device, not both")
            }
            ConfigError::InvalidLinkSettings => {
                write!(f, "connect_attempts and read_buffer must be non-zero")
            }
        }
    }
}

/// How touches map onto the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SurfaceMode {
    /// Touches hit grid cells; messages carry `col,row`
    #[default]
    Grid,
    /// The whole surface is one round button; messages carry only `x,y`
    Button,
}

/// Identity announced to the server
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClientSection {
    pub name: String<MAX_CLIENT_NAME_LEN>,
    pub protocol_version: u8,
}

impl Default for ClientSection {
    fn default() -> Self {
        let mut name = String::new();
        let _ = name.push_str(DEFAULT_CLIENT_NAME);
        Self {
            name,
            protocol_version: PROTOCOL_VERSION,
        }
    }
}

/// Touch surface geometry and initial appearance
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceConfig {
    pub mode: SurfaceMode,
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    pub cols: u16,
    pub rows: u16,
    /// Share of the surface kept as margin and used for cell strokes
    pub border_thickness: f32,
    /// Wire color `#RRGGBBAA`
    pub default_color: String<9>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        let mut default_color = String::new();
        let _ = default_color.push_str(DEFAULT_COLOR);
        Self {
            mode: SurfaceMode::Grid,
            width: 1080,
            height: 1920,
            cols: 1,
            rows: 1,
            border_thickness: DEFAULT_BORDER_THICKNESS,
            default_color,
        }
    }
}

/// Where the link connects and how hard it tries
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// `host:port` of a TCP server
    pub address: Option<String<MAX_TARGET_LEN>>,
    /// Path of a serial character device, e.g. `/dev/rfcomm0`
    pub device: Option<String<MAX_TARGET_LEN>>,
    pub connect_attempts: u8,
    pub retry_delay_ms: u32,
    /// Bytes requested per read
    pub read_buffer: u16,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            address: None,
            device: None,
            connect_attempts: 3,
            retry_delay_ms: 1000,
            read_buffer: 1024,
        }
    }
}

/// Resolved link target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkTarget<'a> {
    Tcp(&'a str),
    Device(&'a str),
}

impl<'a> LinkTarget<'a> {
    /// Human-readable name used in status notices
    pub fn name(&self) -> &'a str {
        match *self {
            LinkTarget::Tcp(address) => address,
            LinkTarget::Device(path) => path,
        }
    }
}

impl LinkConfig {
    pub fn target(&self) -> Result<LinkTarget<'_>, ConfigError> {
        match (&self.address, &self.device) {
            (Some(address), None) => Ok(LinkTarget::Tcp(address.as_str())),
            (None, Some(device)) => Ok(LinkTarget::Device(device.as_str())),
            (None, None) => Err(ConfigError::NoLinkTarget),
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousLinkTarget),
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClientConfig {
    pub client: ClientSection,
    pub surface: SurfaceConfig,
    pub link: LinkConfig,
}

impl ClientConfig {
    /// Check ranges and cross-field rules
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.client.name.as_str();
        if name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if name.contains([',', '\n', '\r']) {
            return Err(ConfigError::InvalidName);
        }

        let dimension = 1..=MAX_DIMENSION;
        if !dimension.contains(&self.surface.cols) || !dimension.contains(&self.surface.rows) {
            return Err(ConfigError::InvalidSize);
        }
        if !(0.0..0.5).contains(&self.surface.border_thickness) {
            return Err(ConfigError::InvalidThickness);
        }
        self.default_color()?;

        self.link.target()?;
        if self.link.connect_attempts == 0 || self.link.read_buffer == 0 {
            return Err(ConfigError::InvalidLinkSettings);
        }
        Ok(())
    }

    /// Parsed default cell color
    pub fn default_color(&self) -> Result<Argb, ConfigError> {
        Argb::from_wire(&self.surface.default_color).map_err(ConfigError::InvalidColor)
    }

    /// Build the initial grid, laid out for the configured surface
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        let mut grid = Grid::with_style(
            self.surface.cols,
            self.surface.rows,
            self.default_color()?,
            self.surface.border_thickness,
        );
        grid.layout(self.surface.width, self.surface.height);
        Ok(grid)
    }
}
