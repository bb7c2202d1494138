// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs an expanded Command and scrapes its result per its OutputChannel.

use std::fs;

use npipes_adapters::run_command;
use npipes_core::{fail, Command, Outcome, OutputChannel};

/// Runs `command`'s arglist, feeding `stdin` iff `command.input_channel_stdin`,
/// then resolves the result per its OutputChannel: `Stdout` forwards the
/// captured stdout, `File(path)` reads that file instead (Failure if it's
/// absent or unreadable).
pub async fn run_and_scrape(command: &Command, body: &str) -> Outcome<String> {
    let stdin = if command.input_channel_stdin { Some(body.as_bytes()) } else { None };

    let stdout = match run_command(&command.arglist, stdin, command.timeout).await {
        Outcome::Success(stdout) => stdout,
        Outcome::Failure(reason) => return Outcome::Failure(reason),
    };

    match &command.output_channel {
        OutputChannel::Stdout => Outcome::Success(stdout),
        OutputChannel::File { filepath } => match fs::read_to_string(filepath) {
            Ok(contents) => Outcome::Success(contents),
            Err(_) => fail!(format!("Output file {filepath} does not exist")),
        },
    }
}

#[cfg(test)]
#[path = "scrape_tests.rs"]
mod tests;
