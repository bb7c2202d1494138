// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire representation of a Step's outgoing transport. Dispatch (actually
//! sending a Message) lives in `npipes-engine`, which owns the adapter
//! collaborators; this type is pure data.

use serde_json::{json, Value};

use crate::serialize::get_str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Nothing,
    Sns { topic: String },
    Sqs { queue_name: String, overflow_path: String },
    Get { uri: String },
    Post { uri: String },
    Lambda { name: String },
    Filesystem { dir: String },
}

impl Default for Trigger {
    fn default() -> Self {
        Trigger::Nothing
    }
}

impl Trigger {
    pub fn to_value(&self) -> Value {
        match self {
            Trigger::Nothing => json!({"type": "Nothing"}),
            Trigger::Sns { topic } => json!({"topic": topic, "type": "SNS"}),
            Trigger::Sqs {
                queue_name,
                overflow_path,
            } => json!({"queueName": queue_name, "overflowPath": overflow_path, "type": "SQS"}),
            Trigger::Get { uri } => json!({"uri": uri, "type": "Get"}),
            Trigger::Post { uri } => json!({"uri": uri, "type": "Post"}),
            Trigger::Lambda { name } => json!({"name": name, "type": "Lambda"}),
            Trigger::Filesystem { dir } => json!({"dir": dir, "type": "Filesystem"}),
        }
    }

    pub fn min_to_value(&self) -> Value {
        self.to_value()
    }

    pub fn from_value(v: &Value) -> Self {
        match get_str(v, "type", "nothing").to_lowercase().as_str() {
            "sns" => Trigger::Sns {
                topic: get_str(v, "topic", ""),
            },
            "sqs" => Trigger::Sqs {
                queue_name: get_str(v, "queueName", ""),
                overflow_path: get_str(v, "overflowPath", ""),
            },
            "get" => Trigger::Get {
                uri: get_str(v, "uri", ""),
            },
            "post" => Trigger::Post {
                uri: get_str(v, "uri", ""),
            },
            "lambda" => Trigger::Lambda {
                name: get_str(v, "name", ""),
            },
            "filesystem" => Trigger::Filesystem {
                dir: get_str(v, "dir", ""),
            },
            _ => Trigger::Nothing,
        }
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
