// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide settings: default Command, producer selection, and the
//! handful of knobs every component reads off a shared [`Configuration`].

use serde_json::{json, Map, Value};

use crate::command::Command;
use crate::serialize::{get_bool, get_str, Serializable};

/// Holds configuration information for the npipes processor.
///
/// Serialized keys are prefixed `NPIPES_` so this round-trips cleanly
/// through environment variables. `pid` is never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub command: Command,
    pub lock_command: bool,
    pub command_validator: String,
    pub producer: String,
    pub producer_args: Map<String, Value>,
    /// S3 prefix the Sqs trigger overflows a too-large message to.
    /// Sourced from `NPIPES_SqsOverflowPath`.
    pub sqs_overflow_path: String,
    pub pid: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            command: Command::default(),
            lock_command: true,
            command_validator: String::new(),
            producer: String::new(),
            producer_args: Map::new(),
            sqs_overflow_path: String::new(),
            pid: std::process::id(),
        }
    }
}

impl Serializable for Configuration {
    fn to_value(&self) -> Value {
        json!({
            "NPIPES_command": self.command.to_value(),
            "NPIPES_lockCommand": self.lock_command,
            "NPIPES_commandValidator": self.command_validator,
            "NPIPES_producer": self.producer,
            "NPIPES_producerArgs": Value::Object(self.producer_args.clone()),
            "NPIPES_SqsOverflowPath": self.sqs_overflow_path,
        })
    }

    fn from_value(v: &Value) -> Self {
        Configuration {
            command: Command::from_value(v.get("NPIPES_command").unwrap_or(&Value::Null)),
            lock_command: get_bool(v, "NPIPES_lockCommand", true),
            command_validator: get_str(v, "NPIPES_commandValidator", ""),
            producer: get_str(v, "NPIPES_producer", ""),
            producer_args: v
                .get("NPIPES_producerArgs")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            sqs_overflow_path: get_str(v, "NPIPES_SqsOverflowPath", ""),
            pid: std::process::id(),
        }
    }
}

#[cfg(test)]
#[path = "configuration_tests.rs"]
mod tests;
