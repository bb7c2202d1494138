// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_the_native_wire_format() {
    let message = Message::default();
    let raw = message.to_min_json_lines();
    let (parsed, extra) = parse_inbound(&raw, "s3://bucket/overflow", Path::new("/tmp")).into_success().unwrap();
    assert_eq!(parsed, message);
    assert!(extra.is_empty());
}

#[test]
fn malformed_input_is_a_failure() {
    assert!(parse_inbound("not json at all", "s3://bucket/overflow", Path::new("/tmp")).is_failure());
}

#[test]
fn legacy_envelope_is_routed_to_the_codec_converter() {
    let dir = tempfile::tempdir().unwrap();
    let raw = "---\nEZQ:\n  process_command: echo hi\n  get_s3_files: []\n...\nhello body";
    let result = parse_inbound(raw, "s3://bucket/overflow", dir.path());
    let (message, extra) = result.into_success().unwrap();
    assert_eq!(message.header.steps.len(), 1);
    assert!(!extra.is_empty());
}
