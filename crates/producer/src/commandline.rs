// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commandline Producer: yields exactly one Message, sourced from
//! `--file`, `--message`, or stdin. Grounded on
//! `original_source/npipes/producers/commandline.py`.

use std::io::Read;
use std::path::PathBuf;

use async_trait::async_trait;
use npipes_core::{Message, Outcome};

use crate::inbound::parse_inbound;
use crate::Producer;

/// Where the single Message's raw text comes from.
pub enum CommandLineSource {
    File(PathBuf),
    Message(String),
    Stdin,
}

pub struct CommandLineProducer {
    source: CommandLineSource,
    sqs_overflow_path: String,
    workdir: PathBuf,
    yielded: bool,
}

impl CommandLineProducer {
    pub fn new(source: CommandLineSource, sqs_overflow_path: impl Into<String>, workdir: PathBuf) -> Self {
        CommandLineProducer {
            source,
            sqs_overflow_path: sqs_overflow_path.into(),
            workdir,
            yielded: false,
        }
    }

    fn read_source(&self) -> Outcome<String> {
        match &self.source {
            CommandLineSource::Message(text) => Outcome::Success(text.clone()),
            CommandLineSource::File(path) => match std::fs::read_to_string(path) {
                Ok(text) => Outcome::Success(text),
                Err(e) => npipes_core::fail!(format!("unable to read {}: {e}", path.display())),
            },
            CommandLineSource::Stdin => {
                let mut text = String::new();
                match std::io::stdin().read_to_string(&mut text) {
                    Ok(_) => Outcome::Success(text),
                    Err(e) => npipes_core::fail!(format!("unable to read stdin: {e}")),
                }
            }
        }
    }
}

#[async_trait]
impl Producer for CommandLineProducer {
    async fn next(&mut self) -> Option<Message> {
        if self.yielded {
            return None;
        }
        self.yielded = true;

        let raw = match self.read_source() {
            Outcome::Success(raw) => raw,
            Outcome::Failure(reason) => {
                tracing::error!(error = %reason, "unable to read commandline message");
                return None;
            }
        };
        match parse_inbound(&raw, &self.sqs_overflow_path, &self.workdir) {
            Outcome::Success((message, _extra_cleanup)) => Some(message),
            Outcome::Failure(reason) => {
                tracing::error!(error = %reason, "malformed commandline message");
                None
            }
        }
    }

    /// Single-shot: nothing to ack once the one Message has been produced.
    async fn report(&mut self, _last: &Message, _outcome: &Outcome<String>) {}
}

#[cfg(test)]
#[path = "commandline_tests.rs"]
mod tests;
