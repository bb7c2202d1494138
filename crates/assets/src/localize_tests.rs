// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use npipes_adapters::FakeBlobStore;
use npipes_adapters::FakeHttpClient;
use npipes_core::{AssetSettings, Decompression, S3Path};

fn s3_asset(key: &str, decompress: bool) -> Asset {
    Asset::S3 {
        path: S3Path::new("bucket", key),
        settings: AssetSettings {
            id: "a".to_string(),
            decompression: Decompression { decompress },
            local_target: String::new(),
        },
    }
}

#[tokio::test]
async fn localizes_a_single_s3_asset_to_its_key_as_local_target() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = Arc::new(FakeBlobStore::new());
    blobs.seed(&S3Path::new("bucket", "a/data.txt"), b"hello".to_vec(), "etag123");
    let http = Arc::new(FakeHttpClient::new());

    let assets = vec![s3_asset("a/data.txt", false)];
    let paths = localize_assets(&assets, blobs, http, dir.path()).await.into_success().unwrap();

    assert_eq!(paths.len(), 1);
    assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "hello");
    assert_eq!(paths[0].file_name().unwrap(), "data.txt");
}

#[tokio::test]
async fn decompresses_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let mut gz_bytes = Vec::new();
    {
        use std::io::Write;
        let mut encoder = flate2::write::GzEncoder::new(&mut gz_bytes, flate2::Compression::default());
        encoder.write_all(b"decompressed contents").unwrap();
        encoder.finish().unwrap();
    }
    let blobs = Arc::new(FakeBlobStore::new());
    blobs.seed(&S3Path::new("bucket", "a/data.json.gz"), gz_bytes, "etag");
    let http = Arc::new(FakeHttpClient::new());

    let assets = vec![s3_asset("a/data.json.gz", true)];
    let paths = localize_assets(&assets, blobs, http, dir.path()).await.into_success().unwrap();

    // The local target keeps the remote key's name verbatim, `.gz` and all,
    // even though its contents are now decompressed -- renameToLocalTarget
    // in the original never adjusts the extension for this.
    assert_eq!(paths[0].file_name().unwrap(), "data.json.gz");
    assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "decompressed contents");
}

#[tokio::test]
async fn rolls_back_successful_siblings_when_one_asset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = Arc::new(FakeBlobStore::new());
    blobs.seed(&S3Path::new("bucket", "ok.txt"), b"fine".to_vec(), "etag");
    // "missing.txt" is intentionally not seeded, so its download fails.
    let http = Arc::new(FakeHttpClient::new());

    let assets = vec![s3_asset("ok.txt", false), s3_asset("missing.txt", false)];
    let result = localize_assets(&assets, blobs, http, dir.path()).await;

    assert!(result.is_failure());
    let mut entries = fs::read_dir(dir.path()).unwrap();
    assert!(entries.next().is_none(), "expected the successful sibling to be rolled back");
}

#[test]
fn rename_to_local_target_copies_a_directory_when_the_target_has_no_filename() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("extracted");
    fs::create_dir_all(src.join("nested")).unwrap();
    fs::write(src.join("a.txt"), "top").unwrap();
    fs::write(src.join("nested").join("b.txt"), "nested").unwrap();

    let asset = Asset::S3 {
        path: S3Path::new("bucket", "archive.zip"),
        settings: AssetSettings {
            id: "a".to_string(),
            decompression: Decompression { decompress: true },
            local_target: ".".to_string(),
        },
    };

    let target = rename_to_local_target(src.clone(), &asset, dir.path()).into_success().unwrap();

    assert_eq!(target, dir.path());
    assert_eq!(fs::read_to_string(target.join("a.txt")).unwrap(), "top");
    assert_eq!(fs::read_to_string(target.join("nested").join("b.txt")).unwrap(), "nested");
    assert!(!src.exists(), "source directory should be removed after copying");
}

#[test]
fn rename_to_local_target_fails_when_a_plain_file_targets_a_directory_marker() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("a_file");
    fs::write(&src, "contents").unwrap();

    let asset = Asset::S3 {
        path: S3Path::new("bucket", "a_file"),
        settings: AssetSettings {
            id: "a".to_string(),
            decompression: Decompression::default(),
            local_target: ".".to_string(),
        },
    };

    let outcome = rename_to_local_target(src, &asset, dir.path());
    assert!(outcome.is_failure());
}

#[tokio::test]
async fn localizes_uri_asset_via_http_get() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = Arc::new(FakeBlobStore::new());
    let http = Arc::new(FakeHttpClient::new());

    let assets = vec![Asset::Uri {
        uri: "https://example.com/report.csv".to_string(),
        settings: AssetSettings::default(),
    }];
    let paths = localize_assets(&assets, blobs, http.clone(), dir.path()).await.into_success().unwrap();

    assert_eq!(paths[0].file_name().unwrap(), "report.csv");
    assert_eq!(http.calls().len(), 1);
}
