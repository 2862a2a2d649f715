//! Blue Dot client
//!
//! Connects to a Blue Dot server and turns simulated finger input on stdin
//! into press, move and release messages, while applying the server's
//! appearance commands to a grid previewed on stdout.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use embassy_executor::Spawner;
use tracing::info;

use bluedot_client::config::{load_config, Overrides};
use bluedot_client::display::ConsoleRenderer;
use bluedot_client::link::{spawn_link, Endpoint, LinkSettings, SharedLink};
use bluedot_client::tasks::{self, ClientSession};
use bluedot_client::{input, telemetry, ClientError};
use bluedot_core::config::SurfaceMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Touches hit grid cells
    Grid,
    /// The whole surface is one button
    Button,
}

impl From<Mode> for SurfaceMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Grid => SurfaceMode::Grid,
            Mode::Button => SurfaceMode::Button,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "bluedot-client", version, about = "Touch client for Blue Dot servers")]
struct Args {
    /// TOML configuration file (defaults to the built-in client.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Connect over TCP to host:port
    #[arg(long, conflicts_with = "device")]
    address: Option<String>,

    /// Connect through a serial device such as /dev/rfcomm0
    #[arg(long)]
    device: Option<PathBuf>,

    /// Surface mode
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Client name sent in the handshake
    #[arg(long)]
    name: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            address: self.address.clone(),
            device: self
                .device
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
            mode: self.mode.map(SurfaceMode::from),
            name: self.name.clone(),
        }
    }
}

/// Load the configuration and start the link and input threads
fn start(args: &Args) -> Result<ClientSession, ClientError> {
    let config = load_config(args.config.as_deref(), &args.overrides())?;
    let endpoint = Endpoint::from(config.link.target()?);
    info!(
        "{} ({:?} mode, {}x{}) -> {:?}",
        config.client.name,
        config.surface.mode,
        config.surface.cols,
        config.surface.rows,
        endpoint
    );

    let link = SharedLink::new();
    let session = ClientSession::new(&config, link.clone(), ConsoleRenderer::stdout())?;

    spawn_link(endpoint, LinkSettings::from(&config.link), link).map_err(ClientError::Spawn)?;
    input::spawn_stdin().map_err(ClientError::Spawn)?;
    Ok(session)
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let args = Args::parse();
    telemetry::init_tracing(telemetry::default_level(args.verbose));
    info!("Blue Dot client starting...");

    let session = match start(&args) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("bluedot-client: {}", e);
            std::process::exit(1);
        }
    };

    spawner.spawn(tasks::session_task(session)).unwrap();
}
