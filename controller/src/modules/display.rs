/// ----- DISPLAY MODULE -----
/// Consumes notifications from the dispatcher and shows them, either as a
/// redrawn status table, as JSON lines on stdout or as log events.

use std::io::{self, Write};

use crossbeam_channel::{select, Receiver};
use tracing::info;

use shared_resources::notification::Notification;

use crate::utilities::debug::Debug;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Table,
    Json,
    Log,
}

pub fn main(
    mode: DisplayMode,
    num_floors: u8,
    num_lifts: u8,
    notification_rx: Receiver<Notification>,
    building_rx: Receiver<(u8, u8)>,
) -> io::Result<()> {
    let mut debug = Debug::new(num_floors, num_lifts);
    if mode == DisplayMode::Table {
        debug.printstatus()?;
    }

    loop {
        select! {
            recv(notification_rx) -> msg => {
                match msg {
                    Ok(notification) => show(mode, &mut debug, &notification)?,
                    Err(_) => return Ok(()),
                }
            },
            recv(building_rx) -> msg => {
                match msg {
                    Ok((floors, lifts)) => {
                        debug.rebuild(floors, lifts);
                        if mode == DisplayMode::Table {
                            debug.printstatus()?;
                        }
                    },
                    Err(_) => {
                        // scheduler is gone, show what it sent before stopping
                        for notification in notification_rx.iter() {
                            show(mode, &mut debug, &notification)?;
                        }
                        return Ok(());
                    },
                }
            },
        }
    }
}

fn show(mode: DisplayMode, debug: &mut Debug, notification: &Notification) -> io::Result<()> {
    match mode {
        DisplayMode::Table => {
            debug.apply(notification);
            debug.printstatus()
        }
        DisplayMode::Json => print_json(notification),
        DisplayMode::Log => {
            info!(?notification, "notification");
            Ok(())
        }
    }
}

fn print_json(notification: &Notification) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, notification)?;
    writeln!(stdout)
}
