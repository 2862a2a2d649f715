//! Client configuration loader

use std::path::Path;

use heapless::String as HString;
use tracing::{debug, info};

use bluedot_core::config::{ClientConfig, SurfaceMode, MAX_TARGET_LEN};
use bluedot_protocol::MAX_CLIENT_NAME_LEN;

use crate::error::{ClientError, Result};

/// Embedded default configuration (compiled into the binary)
/// Edit client.toml and rebuild to customize
pub const EMBEDDED_CONFIG: &str = include_str!("../../client.toml");

/// Settings given on the command line, applied after the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// TCP `host:port`; replaces any configured device
    pub address: Option<String>,
    /// Serial device path; replaces any configured address
    pub device: Option<String>,
    pub mode: Option<SurfaceMode>,
    pub name: Option<String>,
}

/// Parse a TOML document into a configuration without validating it
pub fn parse_config(text: &str) -> Result<ClientConfig> {
    Ok(toml::from_str(text)?)
}

/// Load, override and validate the configuration
///
/// With no `path` the embedded `client.toml` is used.
pub fn load_config(path: Option<&Path>, overrides: &Overrides) -> Result<ClientConfig> {
    let mut config = match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            let text = std::fs::read_to_string(path).map_err(|source| ClientError::ReadConfig {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&text)?
        }
        None => {
            debug!("Using embedded config");
            parse_config(EMBEDDED_CONFIG)?
        }
    };

    apply_overrides(&mut config, overrides)?;
    config.validate()?;
    Ok(config)
}

fn apply_overrides(config: &mut ClientConfig, overrides: &Overrides) -> Result<()> {
    if let Some(address) = &overrides.address {
        config.link.address = Some(bounded::<MAX_TARGET_LEN>("address", address)?);
        config.link.device = None;
    }
    if let Some(device) = &overrides.device {
        config.link.device = Some(bounded::<MAX_TARGET_LEN>("device", device)?);
        config.link.address = None;
    }
    if let Some(mode) = overrides.mode {
        config.surface.mode = mode;
    }
    if let Some(name) = &overrides.name {
        config.client.name = bounded::<MAX_CLIENT_NAME_LEN>("name", name)?;
    }
    Ok(())
}

fn bounded<const N: usize>(field: &'static str, value: &str) -> Result<HString<N>> {
    HString::try_from(value).map_err(|_| ClientError::TooLong { field, max: N })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluedot_core::config::{ConfigError, LinkTarget};
    use std::io::Write;

    #[test]
    fn test_embedded_config_is_valid() {
        let config = parse_config(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.client.protocol_version, 2);
        assert_eq!(config.surface.mode, SurfaceMode::Grid);
        assert_eq!(config.link.target(), Ok(LinkTarget::Tcp("127.0.0.1:8000")));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config("[link]\ndevice = \"/dev/rfcomm0\"\n").unwrap();
        assert_eq!(config.surface.cols, 1);
        assert_eq!(config.link.connect_attempts, 3);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_surface_section() {
        let text = r##"
[surface]
mode = "button"
cols = 3
rows = 2
default_color = "#FF0000FF"

[link]
address = "10.0.0.2:9000"
"##;
        let config = parse_config(text).unwrap();
        assert_eq!(config.surface.mode, SurfaceMode::Button);
        assert_eq!((config.surface.cols, config.surface.rows), (3, 2));
        assert_eq!(config.surface.default_color.as_str(), "#FF0000FF");
    }

    #[test]
    fn test_bad_toml_is_reported() {
        assert!(matches!(
            parse_config("[surface\nmode = 1"),
            Err(ClientError::Toml(_))
        ));
        assert!(matches!(
            parse_config("[surface]\nmode = \"triangle\"\n"),
            Err(ClientError::Toml(_))
        ));
    }

    #[test]
    fn test_overrides_replace_target() {
        let overrides = Overrides {
            device: Some("/dev/rfcomm1".into()),
            mode: Some(SurfaceMode::Button),
            name: Some("bench".into()),
            ..Overrides::default()
        };
        let config = load_config(None, &overrides).unwrap();
        assert_eq!(config.link.target(), Ok(LinkTarget::Device("/dev/rfcomm1")));
        assert_eq!(config.surface.mode, SurfaceMode::Button);
        assert_eq!(config.client.name.as_str(), "bench");
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let overrides = Overrides {
            name: Some("a,b".into()),
            ..Overrides::default()
        };
        assert!(matches!(
            load_config(None, &overrides),
            Err(ClientError::Config(ConfigError::InvalidName))
        ));

        let overrides = Overrides {
            name: Some("x".repeat(MAX_CLIENT_NAME_LEN + 1)),
            ..Overrides::default()
        };
        assert!(matches!(
            load_config(None, &overrides),
            Err(ClientError::TooLong { field: "name", .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("bluedot-client-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[surface]\ncols = 4\n[link]\ndevice = \"/dev/ttyS0\"").unwrap();
        drop(file);

        let config = load_config(Some(&path), &Overrides::default()).unwrap();
        assert_eq!(config.surface.cols, 4);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            load_config(Some(&path), &Overrides::default()),
            Err(ClientError::ReadConfig { .. })
        ));
    }
}
