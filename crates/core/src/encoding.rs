// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Body/header encoding variant, and the gzip+base64 codec it names.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::fail;
use crate::outcome::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    PlainText,
    GzB64,
}

impl Encoding {
    pub const PLAINTEXT_TAG: &'static str = "plaintext";
    pub const GZB64_TAG: &'static str = "gzb64";

    pub fn tag(&self) -> &'static str {
        match self {
            Encoding::PlainText => Self::PLAINTEXT_TAG,
            Encoding::GzB64 => Self::GZB64_TAG,
        }
    }

    /// Case-insensitive parse; unknown tags fall back to `PlainText`,
    /// matching the defensive-default rule for `from-dict`.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case(Self::GZB64_TAG) {
            Encoding::GzB64
        } else {
            Encoding::PlainText
        }
    }
}

/// Converts a plain string to gzip(level 9) + base64, the inverse of
/// [`from_gz_b64`].
pub fn to_gz_b64(s: &str) -> Outcome<String> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(9));
    if let Err(e) = encoder.write_all(s.as_bytes()) {
        return fail!(format!("gzip compression failed: {e}"));
    }
    match encoder.finish() {
        Ok(bytes) => Outcome::Success(BASE64.encode(bytes)),
        Err(e) => fail!(format!("gzip compression failed: {e}")),
    }
}

/// Inverse of [`to_gz_b64`]: base64-decode then gunzip.
pub fn from_gz_b64(b: &str) -> Outcome<String> {
    let bytes = match BASE64.decode(b.trim()) {
        Ok(b) => b,
        Err(e) => return fail!(format!("base64 decode failed: {e}")),
    };
    let mut decoder = GzDecoder::new(bytes.as_slice());
    let mut out = String::new();
    match decoder.read_to_string(&mut out) {
        Ok(_) => Outcome::Success(out),
        Err(e) => fail!(format!("gzip decompression failed: {e}")),
    }
}

/// Raw gzip bytes (level 9), used by auto-overflow's blob-store path which
/// needs the compressed bytes without the base64 layer.
pub fn gzip_bytes(data: &[u8]) -> Outcome<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(9));
    if let Err(e) = encoder.write_all(data) {
        return fail!(format!("gzip compression failed: {e}"));
    }
    match encoder.finish() {
        Ok(bytes) => Outcome::Success(bytes),
        Err(e) => fail!(format!("gzip compression failed: {e}")),
    }
}

#[cfg(test)]
#[path = "encoding_tests.rs"]
mod tests;
