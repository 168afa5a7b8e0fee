//! Keyboard input mapped onto tracker commands

use crate::core::currency::Currency;
use crate::core::tracker::Command;
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Maps one line of user input to a command. Blank lines are ignored.
pub fn parse_command(line: &str) -> Option<Command> {
    let input = line.trim().to_lowercase();
    match input.as_str() {
        "" => None,
        "q" | "quit" | "exit" => Some(Command::Quit),
        "r" | "refresh" => Some(Command::ManualRefresh),
        other => match other.parse::<Currency>() {
            Ok(currency) => Some(Command::SetCurrency(currency)),
            Err(e) => {
                warn!(input = %other, error = %e, "Ignoring unrecognised input");
                None
            }
        },
    }
}

/// Reads stdin on a plain thread so a pending read never holds up runtime
/// shutdown. End of input only stops the reader; Ctrl-C still quits.
pub fn spawn_stdin_reader(commands: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if let Some(command) = parse_command(&line) {
                if commands.blocking_send(command).is_err() || command == Command::Quit {
                    break;
                }
            }
        }
        debug!("Stdin reader finished");
    });
}

pub fn spawn_ctrl_c_handler(commands: mpsc::Sender<Command>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Ctrl-C received");
            let _ = commands.send(Command::Quit).await;
        }
    });
}
