//! Build script for bluedot-client
//!
//! Validates the embedded client.toml at compile time so a broken default
//! never ships.

use std::fs;
use std::path::Path;

#[path = "build_support.rs"]
mod build_support;

use build_support::report_line;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    validate_config();
}

/// Validate client.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=client.toml");

    let config_path = Path::new("client.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read client.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in client.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_client(&config, &mut errors);
    validate_surface(&config, &mut errors);
    validate_link(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in client.toml", &errors);
    }
}

/// Print a boxed error report and abort the build
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| report_line(line))
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

fn validate_client(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(client) = config.get("client").and_then(|c| c.as_table()) else {
        return;
    };

    if let Some(name) = client.get("name") {
        match name.as_str() {
            Some(name) if name.is_empty() => errors.push("[client] name is empty".into()),
            Some(name) if name.contains([',', '\n', '\r']) => {
                errors.push("[client] name must not contain commas".into())
            }
            Some(name) if name.len() > 32 => {
                errors.push("[client] name is longer than 32 bytes".into())
            }
            Some(_) => {}
            None => errors.push("[client] name must be a string".into()),
        }
    }
}

fn validate_surface(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(surface) = config.get("surface").and_then(|s| s.as_table()) else {
        return;
    };

    if let Some(toml::Value::String(mode)) = surface.get("mode") {
        if !["grid", "button"].contains(&mode.as_str()) {
            errors.push("[surface] mode must be 'grid' or 'button'".into());
        }
    }

    for key in ["cols", "rows"] {
        if let Some(toml::Value::Integer(n)) = surface.get(key) {
            if *n < 1 || *n > 255 {
                errors.push(format!("[surface] {} must be 1-255", key));
            }
        }
    }

    if let Some(toml::Value::Float(t)) = surface.get("border_thickness") {
        if !(0.0..0.5).contains(t) {
            errors.push("[surface] border_thickness must be 0.0-0.5".into());
        }
    }

    if let Some(toml::Value::String(color)) = surface.get("default_color") {
        let hex = color.strip_prefix('#').unwrap_or("");
        if hex.len() != 8 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            errors.push("[surface] default_color must be #RRGGBBAA".into());
        }
    }
}

fn validate_link(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(link) = config.get("link").and_then(|l| l.as_table()) else {
        errors.push("Missing [link] section".into());
        return;
    };

    match (link.get("address"), link.get("device")) {
        (None, None) => errors.push("[link] needs an address or a device".into()),
        (Some(_), Some(_)) => errors.push("[link] set an address or a device, not both".into()),
        _ => {}
    }

    if let Some(toml::Value::Integer(n)) = link.get("connect_attempts") {
        if *n < 1 || *n > 255 {
            errors.push("[link] connect_attempts must be 1-255".into());
        }
    }
}
