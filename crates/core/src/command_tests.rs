// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn round_trips_through_value() {
    let c = Command {
        arglist: vec!["cat".into(), "${bodyfile}".into()],
        timeout: 30,
        input_channel_stdin: true,
        output_channel: OutputChannel::File {
            filepath: "out.txt".into(),
        },
    };
    assert_eq!(Command::from_value(&c.to_value()), c);
}

#[test]
fn min_to_value_matches_scenario_2() {
    let c = Command {
        arglist: vec!["cat".into(), "${bodyfile}".into()],
        ..Default::default()
    };
    assert_eq!(c.min_to_value(), json!({"arglist": ["cat", "${bodyfile}"]}));
}

#[test]
fn from_value_defaults_missing_fields() {
    assert_eq!(Command::from_value(&json!({})), Command::default());
}

#[test]
fn output_channel_file_default_uses_unique_sentinel() {
    assert_eq!(
        OutputChannel::file_default(),
        OutputChannel::File {
            filepath: "${unique}".into()
        }
    );
}
