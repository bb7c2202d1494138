// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;
use std::thread::sleep;
use std::time::Duration as StdDuration;

use super::*;

fn wire(message: &Message) -> String {
    message.to_min_json_lines()
}

fn write_message(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, wire(&Message::default())).unwrap();
    path
}

#[tokio::test]
async fn yields_files_oldest_first_and_marks_them_processed_on_success() {
    let dir = tempfile::tempdir().unwrap();
    write_message(dir.path(), "a.msg");
    sleep(StdDuration::from_millis(10));
    write_message(dir.path(), "b.msg");

    let mut producer = FilesystemProducer::new(
        dir.path().to_path_buf(),
        false,
        false,
        Duration::from_millis(10),
        true,
        "s3://bucket/overflow",
        std::env::temp_dir(),
    );

    let first = producer.next().await.unwrap();
    producer.report(&first, &Outcome::Success("ok".to_string())).await;
    let second = producer.next().await.unwrap();
    producer.report(&second, &Outcome::Success("ok".to_string())).await;

    assert!(producer.next().await.is_none());
    // Neither file was removed since remove_successes is false.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[tokio::test]
async fn remove_successes_deletes_the_file_after_a_successful_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_message(dir.path(), "a.msg");

    let mut producer =
        FilesystemProducer::new(dir.path().to_path_buf(), true, false, Duration::from_millis(10), true, "s3://bucket/overflow", std::env::temp_dir());

    let message = producer.next().await.unwrap();
    producer.report(&message, &Outcome::Success("ok".to_string())).await;

    assert!(!path.exists());
}

#[tokio::test]
async fn remove_failures_deletes_the_file_after_a_failed_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_message(dir.path(), "a.msg");

    let mut producer = FilesystemProducer::new(
        dir.path().to_path_buf(),
        false,
        true,
        Duration::from_millis(10),
        true,
        "s3://bucket/overflow",
        std::env::temp_dir(),
    );

    let message = producer.next().await.unwrap();
    producer.report(&message, &Outcome::Failure("boom".to_string())).await;

    assert!(!path.exists());
}

#[tokio::test]
async fn quit_when_empty_stops_after_one_pass() {
    let dir = tempfile::tempdir().unwrap();
    let mut producer = FilesystemProducer::new(
        dir.path().to_path_buf(),
        false,
        false,
        Duration::from_millis(10),
        true,
        "s3://bucket/overflow",
        std::env::temp_dir(),
    );
    assert!(producer.next().await.is_none());
}
