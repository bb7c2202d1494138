// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path to an object in blob storage, round-tripping through `s3://bucket/key`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct S3Path {
    pub bucket: String,
    pub key: String,
}

impl S3Path {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        S3Path {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parses `s3://bucket/key/parts...`. Panics are never used here;
    /// malformed input that has no `"://"` yields an empty bucket/key pair,
    /// matching the defensive-default rule used throughout the wire codec.
    pub fn parse(s: &str) -> Self {
        match s.split_once("://") {
            Some((_, rest)) => match rest.split_once('/') {
                Some((bucket, key)) => S3Path::new(bucket, key),
                None => S3Path::new(rest, ""),
            },
            None => S3Path::default(),
        }
    }

    /// Appends a path segment onto the key, mirroring `S3Path.add` in the
    /// original implementation.
    pub fn add(&self, path: &str) -> S3Path {
        let joined = if self.key.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.key.trim_end_matches('/'), path)
        };
        S3Path::new(self.bucket.clone(), joined)
    }
}

impl fmt::Display for S3Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

#[cfg(test)]
#[path = "s3path_tests.rs"]
mod tests;
