// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use npipes_core::to_gz_b64;

#[test]
fn plaintext_body_is_returned_as_is() {
    let body = Body::InString {
        string: "hello".to_string(),
        encoding: Encoding::PlainText,
    };
    let localized: Vec<(String, &Path)> = Vec::new();
    assert_eq!(extract_body(&body, &localized).into_success().unwrap(), "hello");
}

#[test]
fn gzb64_body_is_decoded() {
    let encoded = to_gz_b64("compressed payload").into_success().unwrap();
    let body = Body::InString {
        string: encoded,
        encoding: Encoding::GzB64,
    };
    let localized: Vec<(String, &Path)> = Vec::new();
    assert_eq!(extract_body(&body, &localized).into_success().unwrap(), "compressed payload");
}

#[test]
fn asset_body_reads_the_localized_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("asset.txt");
    std::fs::write(&path, "asset contents").unwrap();

    let body = Body::InAsset {
        asset_id: "a".to_string(),
    };
    let localized = vec![("a".to_string(), path.as_path())];
    assert_eq!(extract_body(&body, &localized).into_success().unwrap(), "asset contents");
}

#[test]
fn asset_body_with_no_matching_id_is_an_empty_string() {
    let body = Body::InAsset {
        asset_id: "missing".to_string(),
    };
    let localized: Vec<(String, &Path)> = Vec::new();
    assert_eq!(extract_body(&body, &localized).into_success().unwrap(), "");
}
