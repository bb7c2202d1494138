// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

#[tokio::test]
async fn gzip_decompresses_to_stem_path() {
    let dir = tempfile::tempdir().unwrap();
    let gz_path = dir.path().join("data.json.gz");
    let mut encoder = flate2::write::GzEncoder::new(fs::File::create(&gz_path).unwrap(), flate2::Compression::default());
    encoder.write_all(b"hello world").unwrap();
    encoder.finish().unwrap();

    let result = decompress(gz_path).await.into_success().unwrap();
    assert_eq!(result.file_name().unwrap(), "data.json");
    assert_eq!(fs::read_to_string(&result).unwrap(), "hello world");
}

#[tokio::test]
async fn tgz_decompresses_with_tar_extension() {
    let dir = tempfile::tempdir().unwrap();
    let tgz_path = dir.path().join("archive.tgz");
    let mut encoder = flate2::write::GzEncoder::new(fs::File::create(&tgz_path).unwrap(), flate2::Compression::default());
    encoder.write_all(b"fake tar bytes").unwrap();
    encoder.finish().unwrap();

    let result = decompress(tgz_path).await.into_success().unwrap();
    assert_eq!(result.file_name().unwrap(), "archive.tar");
}

#[tokio::test]
async fn unknown_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    fs::write(&path, b"raw").unwrap();
    let reason = decompress(path).await.into_failure().unwrap();
    assert!(reason.contains("decompressor"), "got: {reason}");
}
