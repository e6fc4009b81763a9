use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, Level};

use controller::modules;
use controller::modules::display::DisplayMode;
use shared_resources::config::{self, SimulationConfig};

/// Multi-lift dispatch simulator. Type `<floor> up|down` to press a call
/// button, `reset <floors> <lifts>` to rebuild the building, `status` or
/// `quit`.
#[derive(Parser, Debug)]
#[command(name = "controller", version)]
struct Cli {
    /// Configuration file (defaults to config.json, then _config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of floors (2 to 9)
    #[arg(short, long)]
    floors: Option<u8>,

    /// Number of lifts (1 to 5)
    #[arg(short, long)]
    lifts: Option<u8>,

    /// Simulated seconds per real second
    #[arg(short, long)]
    speed: Option<f64>,

    /// How notifications are shown
    #[arg(short, long, value_enum, default_value_t = DisplayMode::Table)]
    display: DisplayMode,

    /// Log every state transition
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    // READ CONFIGURATION
    let mut config_file = match config::read_config_file(cli.config.as_deref()) {
        Ok(config_file) => config_file,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(floors) = cli.floors {
        config_file.floors = floors;
    }
    if let Some(lifts) = cli.lifts {
        config_file.lifts = lifts;
    }
    if let Some(speed) = cli.speed {
        config_file.speed = speed;
    }
    let config = match SimulationConfig::from_file(config_file) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match modules::run(config, cli.display) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
