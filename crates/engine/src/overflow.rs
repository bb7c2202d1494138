// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shrinks an outbound Sqs Message that won't fit in SQS's 262,144-byte cap.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use npipes_adapters::BlobStore;
use npipes_core::{gzip_bytes, Asset, AssetSettings, Body, Decompression, Encoding, Message, Outcome, S3Path, Serializable};

/// Budget reserving headroom under SQS's 262,144-byte service cap.
const BUDGET_BYTES: usize = 260_000;
/// Additional bytes `Encoding::GzB64`'s wrapper occupies once substituted
/// into the message, beyond the compressed+base64'd payload itself.
const GZB64_WRAPPER_OVERHEAD: usize = 23;

/// Leaves `message` unchanged if its full (non-minimal) JSON-lines
/// encoding already fits `BUDGET_BYTES`. Otherwise: gzip+base64 the body
/// inline if that lands under budget; failing that, upload the gzip bytes
/// to `<overflow_path>/<random>` and replace the body with a reference to
/// a newly appended `AutoOverflow` asset on the head step. A Message whose
/// body is already `InAsset` is returned unchanged — header-only overflow
/// is out of scope.
pub async fn overflow(message: Message, overflow_path: &str, blobs: &dyn BlobStore) -> Outcome<Message> {
    let Body::InString { string, .. } = &message.body else {
        return Outcome::Success(message);
    };

    let over_amount = message.to_json_lines().len() as i64 - BUDGET_BYTES as i64;
    if over_amount <= 0 {
        return Outcome::Success(message);
    }

    let body_bytes = string.as_bytes();
    let gz_bytes = match gzip_bytes(body_bytes) {
        Outcome::Success(bytes) => bytes,
        Outcome::Failure(reason) => return Outcome::Failure(reason),
    };
    let b64_text = BASE64.encode(&gz_bytes);

    if (b64_text.len() as i64) < (over_amount - GZB64_WRAPPER_OVERHEAD as i64) {
        let mut message = message;
        message.body = Body::InString {
            string: b64_text,
            encoding: Encoding::GzB64,
        };
        return Outcome::Success(message);
    }

    let fname = crate::util::random_name();
    let s3_path = S3Path::new(overflow_path_bucket(overflow_path), overflow_path_key(overflow_path)).add(&fname);
    if let Outcome::Failure(reason) = blobs.put_object(&s3_path, gz_bytes).await {
        return Outcome::Failure(reason);
    }

    let asset = Asset::S3 {
        path: s3_path,
        settings: AssetSettings {
            id: "AutoOverflow".to_string(),
            decompression: Decompression { decompress: true },
            local_target: String::new(),
        },
    };

    let mut message = message;
    if let Some(head) = message.header.steps.first_mut() {
        head.assets.push(asset);
    }
    message.body = Body::InAsset {
        asset_id: "AutoOverflow".to_string(),
    };
    Outcome::Success(message)
}

fn overflow_path_bucket(overflow_path: &str) -> String {
    S3Path::parse(overflow_path).bucket
}

fn overflow_path_key(overflow_path: &str) -> String {
    S3Path::parse(overflow_path).key
}

#[cfg(test)]
#[path = "overflow_tests.rs"]
mod tests;
