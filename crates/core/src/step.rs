// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single stage in a Header's ordered plan.

use serde_json::{json, Value};

use crate::asset::Asset;
use crate::command::Command;
use crate::protocol::Protocol;
use crate::serialize::{get_str, Serializable};
use crate::trigger::Trigger;

/// Reserved id returned for a non-existent step (see [`crate::header::Header::peek_step`]).
pub const EMPTY_STEP_ID: &str = "NPIPES_EMPTY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: String,
    pub trigger: Trigger,
    pub command: Command,
    pub step_timeout: u64,
    pub assets: Vec<Asset>,
    pub protocol: Protocol,
    pub description: String,
}

impl Default for Step {
    fn default() -> Self {
        Step {
            id: EMPTY_STEP_ID.to_string(),
            trigger: Trigger::default(),
            command: Command::default(),
            step_timeout: 0,
            assets: Vec::new(),
            protocol: Protocol::default(),
            description: String::new(),
        }
    }
}

impl Serializable for Step {
    fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "trigger": self.trigger.to_value(),
            "command": self.command.to_value(),
            "stepTimeout": self.step_timeout,
            "assets": self.assets.iter().map(Asset::to_value).collect::<Vec<_>>(),
            "protocol": self.protocol.to_value(),
            "description": self.description,
        })
    }

    fn from_value(v: &Value) -> Self {
        Step {
            id: get_str(v, "id", EMPTY_STEP_ID),
            trigger: Trigger::from_value(v.get("trigger").unwrap_or(&Value::Null)),
            command: Command::from_value(v.get("command").unwrap_or(&Value::Null)),
            step_timeout: crate::serialize::get_u64(v, "stepTimeout", 0),
            assets: crate::serialize::get_array(v, "assets")
                .iter()
                .map(Asset::from_value)
                .collect(),
            protocol: Protocol::from_value(v.get("protocol").unwrap_or(&Value::Null)),
            description: get_str(v, "description", ""),
        }
    }
}

impl Step {
    /// Minimal encoding: nested Command and Asset fields are diffed against
    /// their own defaults, matching `Step._toDict`'s use of the generic
    /// `meth` dispatcher with each field's own `_toMinDict`.
    pub fn min_to_value(&self) -> Value {
        let mut full = self.to_value();
        if let Value::Object(m) = &mut full {
            m.insert("command".to_string(), self.command.min_to_value());
            m.insert(
                "assets".to_string(),
                Value::Array(self.assets.iter().map(Asset::min_to_value).collect()),
            );
        }
        crate::serialize::diff_against_default(&full, &Step::default().to_value())
    }

    pub fn is_empty_sentinel(&self) -> bool {
        self.id == EMPTY_STEP_ID
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
