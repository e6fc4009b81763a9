/// ----- I/O MODULE -----
/// Reads operator commands from stdin on its own thread and hands them to
/// the scheduler over a channel. Lines that do not parse are reported and
/// skipped. End of input counts as `quit`.

use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::warn;

use crate::utilities::command::Command;

pub fn init() -> io::Result<Receiver<Command>> {
    let (command_tx, command_rx) = unbounded();
    thread::Builder::new()
        .name("stdin_commands".to_string())
        .spawn(move || read_commands(io::stdin().lock(), command_tx))?;
    Ok(command_rx)
}

pub fn read_commands<R: BufRead>(input: R, command_tx: Sender<Command>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("could not read input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                let quit = command == Command::Quit;
                if command_tx.send(command).is_err() || quit {
                    return;
                }
            }
            Err(e) => warn!("{}", e),
        }
    }
    let _ = command_tx.send(Command::Quit);
}
