use std::io::{Error, ErrorKind};
use std::thread;

use crossbeam_channel::unbounded;

use shared_resources::config::SimulationConfig;

pub mod dispatcher;
pub mod display;
pub mod io;
pub mod lift;
pub mod scheduler;

use display::DisplayMode;

pub fn run(config: SimulationConfig, display_mode: DisplayMode) -> std::io::Result<()> {
    // INITIALIZE CHANNELS
    let (notification_tx, notification_rx) = unbounded();
    let (building_tx, building_rx) = unbounded();

    // INITIALIZE INPUT MODULE
    let command_rx = io::init()?;

    // INITIALIZE THREAD FOR DISPLAY
    let display_handle = thread::Builder::new().name("display".to_string()).spawn(move || {
        display::main(display_mode, config.floors(), config.lifts(), notification_rx, building_rx)
    })?;

    // INITIALIZE THREAD FOR SCHEDULER
    let scheduler_handle = thread::Builder::new().name("scheduler".to_string()).spawn(move || {
        scheduler::main(config, command_rx, notification_tx, building_tx)
    })?;

    scheduler_handle
        .join()
        .map_err(|_| Error::new(ErrorKind::Other, "scheduler thread panicked"))?;
    display_handle
        .join()
        .map_err(|_| Error::new(ErrorKind::Other, "display thread panicked"))?
}
