// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The ordered plan carried by a Message.

use serde_json::{json, Value};

use crate::encoding::Encoding;
use crate::serialize::{get_array, Serializable};
use crate::step::Step;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub encoding: Encoding,
    pub steps: Vec<Step>,
}

impl Serializable for Header {
    fn to_value(&self) -> Value {
        json!({
            "encoding": {"type": self.encoding.tag()},
            "steps": self.steps.iter().map(Step::to_value).collect::<Vec<_>>(),
        })
    }

    fn from_value(v: &Value) -> Self {
        let encoding_tag = v
            .get("encoding")
            .and_then(|e| e.get("type"))
            .and_then(Value::as_str)
            .unwrap_or(Encoding::PLAINTEXT_TAG);
        Header {
            encoding: Encoding::from_tag(encoding_tag),
            steps: get_array(v, "steps").iter().map(Step::from_value).collect(),
        }
    }
}

impl Header {
    pub fn min_to_value(&self) -> Value {
        let full = json!({
            "encoding": {"type": self.encoding.tag()},
            "steps": self.steps.iter().map(Step::min_to_value).collect::<Vec<_>>(),
        });
        crate::serialize::diff_against_default(&full, &Header::default().to_value())
    }

    /// Returns the nth Step, or the sentinel empty Step if out of range.
    pub fn peek_step(&self, n: usize) -> Step {
        self.steps.get(n).cloned().unwrap_or_default()
    }

    /// Returns the head Step (or sentinel) and a new Header holding the tail.
    /// Encoding is preserved; `self` is never mutated.
    pub fn pop_step(&self) -> (Step, Header) {
        let step = self.peek_step(0);
        let tail = if self.steps.is_empty() {
            Vec::new()
        } else {
            self.steps[1..].to_vec()
        };
        (
            step,
            Header {
                encoding: self.encoding,
                steps: tail,
            },
        )
    }
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod tests;
