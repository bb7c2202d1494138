// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn all_variants_round_trip() {
    let variants = vec![
        Trigger::Nothing,
        Trigger::Sns { topic: "t".into() },
        Trigger::Sqs {
            queue_name: "q".into(),
            overflow_path: "p".into(),
        },
        Trigger::Get { uri: "u".into() },
        Trigger::Post { uri: "u".into() },
        Trigger::Lambda { name: "n".into() },
        Trigger::Filesystem { dir: "d".into() },
    ];
    for t in variants {
        assert_eq!(Trigger::from_value(&t.to_value()), t);
    }
}

#[test]
fn discriminator_spellings_match_wire_table() {
    assert_eq!(Trigger::Sns { topic: "t".into() }.to_value()["type"], "SNS");
    assert_eq!(
        Trigger::Sqs {
            queue_name: "q".into(),
            overflow_path: "p".into()
        }
        .to_value()["type"],
        "SQS"
    );
    assert_eq!(Trigger::Get { uri: "u".into() }.to_value()["type"], "Get");
    assert_eq!(Trigger::Post { uri: "u".into() }.to_value()["type"], "Post");
    assert_eq!(
        Trigger::Lambda { name: "n".into() }.to_value()["type"],
        "Lambda"
    );
    assert_eq!(
        Trigger::Filesystem { dir: "d".into() }.to_value()["type"],
        "Filesystem"
    );
    assert_eq!(Trigger::Nothing.to_value()["type"], "Nothing");
}

#[test]
fn parse_is_case_insensitive() {
    let v = serde_json::json!({"type": "sQs", "queueName": "q", "overflowPath": "p"});
    assert_eq!(
        Trigger::from_value(&v),
        Trigger::Sqs {
            queue_name: "q".into(),
            overflow_path: "p".into()
        }
    );
}

#[test]
fn unknown_type_defaults_to_nothing() {
    let v = serde_json::json!({"type": "bogus"});
    assert_eq!(Trigger::from_value(&v), Trigger::Nothing);
}
