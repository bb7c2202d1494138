// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn chain_short_circuits_on_first_failure() {
    let calls = std::cell::Cell::new(0);
    let result: Outcome<i32> = Outcome::Failure("boom".into())
        .chain(|v: i32| {
            calls.set(calls.get() + 1);
            Outcome::Success(v + 1)
        })
        .chain(|v: i32| {
            calls.set(calls.get() + 1);
            Outcome::Success(v + 1)
        });
    assert_eq!(result, Outcome::Failure("boom".into()));
    assert_eq!(calls.get(), 0);
}

#[test]
fn chain_threads_success_value() {
    let result = Outcome::Success(1)
        .chain(|v| Outcome::Success(v + 1))
        .chain(|v| Outcome::Success(v * 10));
    assert_eq!(result, Outcome::Success(20));
}

#[test]
fn fail_macro_prefixes_site_marker() {
    let oc: Outcome<()> = fail!("bad thing happened");
    let reason = oc.into_failure().unwrap();
    assert!(reason.contains("outcome_tests.rs"));
    assert!(reason.ends_with("bad thing happened"));
}

#[test]
fn map_failed_and_succeeded_partition_sequence() {
    let outcomes = vec![
        Outcome::Success(1),
        Outcome::Failure("a".to_string()),
        Outcome::Success(2),
        Outcome::Failure("b".to_string()),
    ];
    assert_eq!(map_failed(&outcomes), vec!["a", "b"]);
    let outcomes2 = vec![
        Outcome::Success(1),
        Outcome::Failure("a".to_string()),
        Outcome::Success(2),
    ];
    assert_eq!(map_succeeded(outcomes2), vec![1, 2]);
}
