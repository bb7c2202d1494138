// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! (Header, Body) pair; the unit of work flowing through the pipeline.

use serde_json::Value;

use crate::body::Body;
use crate::header::Header;
use crate::outcome::Outcome;
use crate::serialize::Serializable;
use crate::fail;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub body: Body,
}

impl Serializable for Message {
    fn to_value(&self) -> Value {
        serde_json::json!({
            "header": self.header.to_value(),
            "body": self.body.to_value(),
        })
    }

    fn from_value(v: &Value) -> Self {
        Message {
            header: Header::from_value(v.get("header").unwrap_or(&Value::Null)),
            body: Body::from_value(v.get("body").unwrap_or(&Value::Null)),
        }
    }
}

impl Message {
    pub fn min_to_value(&self) -> Value {
        serde_json::json!({
            "header": self.header.min_to_value(),
            "body": self.body.min_to_value(),
        })
    }

    /// First line is the header's JSON, remaining lines are the body's JSON.
    pub fn to_json_lines(&self) -> String {
        format!("{}\n{}", self.header.to_value(), self.body.to_value())
    }

    /// As above, but header and body are each min-serialized first. Used
    /// for outbound messages per the wire-format rule in the Serializer.
    pub fn to_min_json_lines(&self) -> String {
        format!(
            "{}\n{}",
            self.header.min_to_value(),
            self.body.min_to_value()
        )
    }

    pub fn from_json_lines(s: &str) -> Outcome<Message> {
        let mut lines = s.lines();
        let Some(header_line) = lines.next() else {
            return fail!("empty message: missing header line");
        };
        let header_value: Value = match serde_json::from_str(header_line) {
            Ok(v) => v,
            Err(e) => return fail!(format!("malformed header JSON: {e}")),
        };
        let body_text: String = lines.collect::<Vec<_>>().join("\n");
        let body_value: Value = match serde_json::from_str(&body_text) {
            Ok(v) => v,
            Err(e) => return fail!(format!("malformed body JSON: {e}")),
        };
        Outcome::Success(Message {
            header: Header::from_value(&header_value),
            body: Body::from_value(&body_value),
        })
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
