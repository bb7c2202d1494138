// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::command::Command;
use crate::step::Step;

fn sample() -> Message {
    Message {
        header: Header {
            encoding: Encoding::PlainText,
            steps: vec![Step {
                id: "step one".into(),
                command: Command {
                    arglist: vec!["cat".into(), "${bodyfile}".into()],
                    ..Default::default()
                },
                ..Default::default()
            }],
        },
        body: Body::InString {
            string: "hello world".into(),
            encoding: Encoding::PlainText,
        },
    }
}

#[test]
fn round_trips_through_value() {
    let m = sample();
    assert_eq!(Message::from_value(&m.to_value()), m);
}

#[test]
fn from_value_defaults_on_missing_keys() {
    let m = Message::from_value(&serde_json::json!({}));
    assert_eq!(m, Message::default());
}

#[test]
fn to_json_lines_puts_header_on_first_line_and_body_on_rest() {
    let m = sample();
    let lines = m.to_json_lines();
    let mut it = lines.lines();
    let header_line = it.next().expect("header line");
    let body_line: String = it.collect::<Vec<_>>().join("\n");

    let header_value: Value = serde_json::from_str(header_line).expect("valid header JSON");
    assert_eq!(header_value, m.header.to_value());

    let body_value: Value = serde_json::from_str(&body_line).expect("valid body JSON");
    assert_eq!(body_value, m.body.to_value());
}

#[test]
fn to_min_json_lines_uses_minimal_encoding_for_both_halves() {
    let m = sample();
    let lines = m.to_min_json_lines();
    let mut it = lines.lines();
    let header_line = it.next().expect("header line");
    let body_line: String = it.collect::<Vec<_>>().join("\n");

    let header_value: Value = serde_json::from_str(header_line).expect("valid header JSON");
    assert_eq!(header_value, m.header.min_to_value());

    let body_value: Value = serde_json::from_str(&body_line).expect("valid body JSON");
    assert_eq!(body_value, m.body.min_to_value());
}

/// For every Message m with PlainText encoding, fromJsonLines(toJsonLines(m)) == m.
#[test]
fn full_round_trip_through_json_lines_is_identity_for_plaintext() {
    let m = sample();
    let parsed = Message::from_json_lines(&m.to_json_lines());
    assert_eq!(parsed.into_success(), Some(m));
}

#[test]
fn from_json_lines_fails_on_empty_input() {
    let outcome = Message::from_json_lines("");
    assert!(outcome.is_failure());
}

#[test]
fn from_json_lines_fails_on_malformed_header() {
    let outcome = Message::from_json_lines("not json\n{}");
    assert!(outcome.is_failure());
}

#[test]
fn from_json_lines_fails_on_malformed_body() {
    let outcome = Message::from_json_lines("{}\nnot json");
    assert!(outcome.is_failure());
}

#[test]
fn from_json_lines_handles_multiline_body() {
    let m = Message {
        header: Header::default(),
        body: Body::InString {
            string: "line one\nline two".into(),
            encoding: Encoding::PlainText,
        },
    };
    let parsed = Message::from_json_lines(&m.to_json_lines());
    assert_eq!(parsed.into_success(), Some(m));
}
