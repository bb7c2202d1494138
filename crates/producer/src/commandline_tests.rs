// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn wire(message: &Message) -> String {
    message.to_min_json_lines()
}

#[tokio::test]
async fn yields_exactly_one_message_from_a_message_source() {
    let raw = wire(&Message::default());
    let mut producer = CommandLineProducer::new(CommandLineSource::Message(raw), "s3://bucket/overflow", std::env::temp_dir());

    assert!(producer.next().await.is_some());
    assert!(producer.next().await.is_none());
}

#[tokio::test]
async fn yields_a_message_read_from_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("msg.json");
    std::fs::write(&path, wire(&Message::default())).unwrap();

    let mut producer = CommandLineProducer::new(CommandLineSource::File(path), "s3://bucket/overflow", std::env::temp_dir());

    assert!(producer.next().await.is_some());
    assert!(producer.next().await.is_none());
}

#[tokio::test]
async fn a_missing_file_source_yields_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.json");

    let mut producer = CommandLineProducer::new(CommandLineSource::File(path), "s3://bucket/overflow", std::env::temp_dir());

    assert!(producer.next().await.is_none());
}

#[tokio::test]
async fn malformed_message_content_yields_none_instead_of_panicking() {
    let mut producer = CommandLineProducer::new(
        CommandLineSource::Message("not json at all".to_string()),
        "s3://bucket/overflow",
        std::env::temp_dir(),
    );

    assert!(producer.next().await.is_none());
}

#[tokio::test]
async fn report_is_a_no_op() {
    let raw = wire(&Message::default());
    let mut producer = CommandLineProducer::new(CommandLineSource::Message(raw), "s3://bucket/overflow", std::env::temp_dir());

    let message = producer.next().await.unwrap();
    producer.report(&message, &Outcome::Success("ok".to_string())).await;
    producer.report(&message, &Outcome::Failure("boom".to_string())).await;
}
