// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Where a Message's payload actually lives: inline, or in a referenced asset.

use serde_json::{json, Value};

use crate::encoding::Encoding;
use crate::serialize::get_str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    InString { string: String, encoding: Encoding },
    InAsset { asset_id: String },
}

impl Default for Body {
    fn default() -> Self {
        Body::InString {
            string: String::new(),
            encoding: Encoding::PlainText,
        }
    }
}

impl Body {
    pub const STRING_TAG: &'static str = "string";
    pub const ASSET_TAG: &'static str = "asset";

    pub fn to_value(&self) -> Value {
        match self {
            Body::InString { string, encoding } => json!({
                "type": Self::STRING_TAG,
                "string": string,
                "encoding": {"type": encoding.tag()},
            }),
            Body::InAsset { asset_id } => json!({
                "type": Self::ASSET_TAG,
                "assetId": asset_id,
            }),
        }
    }

    pub fn from_value(v: &Value) -> Self {
        let typ = get_str(v, "type", Self::STRING_TAG).to_lowercase();
        if typ == Self::ASSET_TAG {
            Body::InAsset {
                asset_id: get_str(v, "assetId", ""),
            }
        } else {
            let encoding_tag = v
                .get("encoding")
                .and_then(|e| e.get("type"))
                .and_then(Value::as_str)
                .unwrap_or(Encoding::PLAINTEXT_TAG);
            Body::InString {
                string: get_str(v, "string", ""),
                encoding: Encoding::from_tag(encoding_tag),
            }
        }
    }

    pub fn min_to_value(&self) -> Value {
        // Body has no meaningful "default" variant to diff against beyond
        // its own Default impl (empty InString/PlainText); matches the
        // original, which never overrides `_toMinDict` for Body subclasses.
        self.to_value()
    }
}

#[cfg(test)]
#[path = "body_tests.rs"]
mod tests;
