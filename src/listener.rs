//! Stdin listener for playing a table from a terminal.
//!
//! Each line is `<sender>: <text>`. Lines without a sender prefix come from
//! the `console` contact, which may register several names by itself.

use crate::inbox::Inbox;
use std::io::BufRead;
use std::thread::{self, JoinHandle};

pub const CONSOLE_SENDER: &str = "console";

/// Split a console line into `(sender, text)`. Blank lines yield `None`.
pub fn parse_console_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match line.split_once(':') {
        Some((sender, text)) if !sender.trim().is_empty() && !sender.contains(',') => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some((sender.trim().to_string(), text.to_string()))
        }
        _ => Some((CONSOLE_SENDER.to_string(), line.to_string())),
    }
}

/// Read stdin on a dedicated thread until EOF, posting every line to the inbox
pub fn spawn_stdin_listener(inbox: Inbox) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-listener".to_string())
        .spawn(move || {
            tracing::info!("Reading commands from stdin");
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if let Some((sender, text)) = parse_console_line(&line) {
                            inbox.post(text, sender);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Stdin listener stopped: {}", e);
                        return;
                    }
                }
            }
            tracing::info!("Stdin closed");
        })
}
