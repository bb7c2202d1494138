// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A Step's argv, timeout, stdin policy, and where its output is found.

use serde_json::{json, Value};

use crate::serialize::{get_array, get_bool, get_str, get_u64, Serializable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputChannel {
    Stdout,
    File { filepath: String },
}

impl Default for OutputChannel {
    fn default() -> Self {
        OutputChannel::Stdout
    }
}

impl OutputChannel {
    /// Sentinel filepath requesting engine-generated unique naming.
    pub const UNIQUE: &'static str = "${unique}";

    pub fn file_default() -> Self {
        OutputChannel::File {
            filepath: Self::UNIQUE.to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            OutputChannel::Stdout => json!({"type": "Stdout"}),
            OutputChannel::File { filepath } => json!({"filepath": filepath, "type": "File"}),
        }
    }

    pub fn min_to_value(&self) -> Value {
        self.to_value()
    }

    pub fn from_value(v: &Value) -> Self {
        if get_str(v, "type", "stdout").eq_ignore_ascii_case("file") {
            OutputChannel::File {
                filepath: get_str(v, "filepath", Self::UNIQUE),
            }
        } else {
            OutputChannel::Stdout
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub arglist: Vec<String>,
    /// Seconds; 0 means no timeout.
    pub timeout: u64,
    pub input_channel_stdin: bool,
    pub output_channel: OutputChannel,
}

impl Default for Command {
    fn default() -> Self {
        Command {
            arglist: Vec::new(),
            timeout: 0,
            input_channel_stdin: false,
            output_channel: OutputChannel::default(),
        }
    }
}

impl Serializable for Command {
    fn to_value(&self) -> Value {
        json!({
            "arglist": self.arglist,
            "timeout": self.timeout,
            "inputChannelStdin": self.input_channel_stdin,
            "outputChannel": self.output_channel.to_value(),
        })
    }

    fn from_value(v: &Value) -> Self {
        Command {
            arglist: get_array(v, "arglist")
                .iter()
                .filter_map(|s| s.as_str().map(str::to_string))
                .collect(),
            timeout: get_u64(v, "timeout", 0),
            input_channel_stdin: get_bool(v, "inputChannelStdin", false),
            output_channel: OutputChannel::from_value(v.get("outputChannel").unwrap_or(&Value::Null)),
        }
    }
}

impl Command {
    pub fn min_to_value(&self) -> Value {
        crate::serialize::diff_against_default(&self.to_value(), &Command::default().to_value())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
