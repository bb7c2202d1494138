// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn in_string_round_trips() {
    let b = Body::InString {
        string: "hello".into(),
        encoding: Encoding::PlainText,
    };
    assert_eq!(Body::from_value(&b.to_value()), b);
}

#[test]
fn in_asset_round_trips() {
    let b = Body::InAsset {
        asset_id: "AutoOverflow".into(),
    };
    assert_eq!(Body::from_value(&b.to_value()), b);
}

#[test]
fn defaults_to_empty_plaintext_string_on_unknown_type() {
    let v = json!({});
    assert_eq!(Body::from_value(&v), Body::default());
}

#[test]
fn gzb64_encoding_preserved() {
    let b = Body::InString {
        string: "b64data".into(),
        encoding: Encoding::GzB64,
    };
    assert_eq!(Body::from_value(&b.to_value()), b);
}
