// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_bucket_and_key() {
    let p = S3Path::parse("s3://my-bucket/some/key.txt");
    assert_eq!(p.bucket, "my-bucket");
    assert_eq!(p.key, "some/key.txt");
}

#[test]
fn display_round_trips() {
    let p = S3Path::new("bucket", "key_1");
    assert_eq!(S3Path::parse(&p.to_string()), p);
}

#[test]
fn add_joins_on_key() {
    let p = S3Path::new("bucket", "prefix");
    assert_eq!(p.add("file.txt"), S3Path::new("bucket", "prefix/file.txt"));
}

#[test]
fn add_onto_empty_key() {
    let p = S3Path::new("bucket", "");
    assert_eq!(p.add("file.txt"), S3Path::new("bucket", "file.txt"));
}
