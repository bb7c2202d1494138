// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blob storage: fetch, store, and stat objects addressed by [`S3Path`].
//!
//! Kept deliberately dumb — no local-file concerns, no decompression, no
//! "is this download current" decision. That logic lives in `npipes-assets`,
//! which is the caller of this trait.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use md5::{Digest, Md5};
use npipes_core::{fail, Outcome, S3Path};

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetches the full object body.
    async fn get_object(&self, path: &S3Path) -> Outcome<Vec<u8>>;

    /// The object's ETag, unquoted, or `None` if the object doesn't exist.
    async fn get_etag(&self, path: &S3Path) -> Outcome<Option<String>>;

    /// Uploads `data` to `path`, attaching a Content-MD5 header computed
    /// from `data`.
    async fn put_object(&self, path: &S3Path, data: Vec<u8>) -> Outcome<()>;
}

/// `BlobStore` backed by a real S3 bucket via the AWS SDK.
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        S3BlobStore { client }
    }

    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        S3BlobStore::new(aws_sdk_s3::Client::new(&config))
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn get_object(&self, path: &S3Path) -> Outcome<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await;
        match resp {
            Ok(output) => match output.body.collect().await {
                Ok(bytes) => Outcome::Success(bytes.into_bytes().to_vec()),
                Err(e) => fail!(format!("unable to read body of {path}: {e}")),
            },
            Err(e) => fail!(format!("unable to download {path}: {e}")),
        }
    }

    async fn get_etag(&self, path: &S3Path) -> Outcome<Option<String>> {
        let resp = self
            .client
            .head_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .send()
            .await;
        match resp {
            Ok(output) => Outcome::Success(output.e_tag().map(|t| t.trim_matches('"').to_string())),
            Err(e) if e.as_service_error().is_some_and(is_not_found) => Outcome::Success(None),
            Err(e) => fail!(format!("unable to stat {path}: {e}")),
        }
    }

    async fn put_object(&self, path: &S3Path, data: Vec<u8>) -> Outcome<()> {
        let mut hasher = Md5::new();
        hasher.update(&data);
        let md5 = BASE64.encode(hasher.finalize());
        let resp = self
            .client
            .put_object()
            .bucket(&path.bucket)
            .key(&path.key)
            .content_md5(md5)
            .body(data.into())
            .send()
            .await;
        match resp {
            Ok(_) => Outcome::Success(()),
            Err(e) => fail!(format!("unable to upload to {path}: {e}")),
        }
    }
}

fn is_not_found(e: &aws_sdk_s3::operation::head_object::HeadObjectError) -> bool {
    e.is_not_found()
}

/// Lowercase hex MD5 digest, matching the `ETag` format S3 uses for
/// non-multipart objects (see `s3utils.fileMd5` in the original).
fn hex_digest(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{BlobCall, FakeBlobStore};

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Recorded call to [`FakeBlobStore`].
    #[derive(Debug, Clone)]
    pub enum BlobCall {
        Get(S3Path),
        GetEtag(S3Path),
        Put(S3Path, Vec<u8>),
    }

    /// In-memory `BlobStore` for tests. Objects are seeded via
    /// [`FakeBlobStore::seed`]; uploads land back in the same map so a test
    /// can assert on what was written.
    #[derive(Default)]
    pub struct FakeBlobStore {
        inner: Mutex<FakeBlobState>,
    }

    #[derive(Default)]
    struct FakeBlobState {
        objects: HashMap<String, (Vec<u8>, String)>,
        calls: Vec<BlobCall>,
    }

    fn addr(path: &S3Path) -> String {
        path.to_string()
    }

    impl FakeBlobStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seed(&self, path: &S3Path, data: Vec<u8>, etag: impl Into<String>) {
            let mut inner = self.inner.lock().expect("lock poisoned");
            inner.objects.insert(addr(path), (data, etag.into()));
        }

        pub fn calls(&self) -> Vec<BlobCall> {
            self.inner.lock().expect("lock poisoned").calls.clone()
        }

        pub fn get_uploaded(&self, path: &S3Path) -> Option<Vec<u8>> {
            self.inner
                .lock()
                .expect("lock poisoned")
                .objects
                .get(&addr(path))
                .map(|(data, _)| data.clone())
        }
    }

    #[async_trait]
    impl BlobStore for FakeBlobStore {
        async fn get_object(&self, path: &S3Path) -> Outcome<Vec<u8>> {
            let mut inner = self.inner.lock().expect("lock poisoned");
            inner.calls.push(BlobCall::Get(path.clone()));
            match inner.objects.get(&addr(path)) {
                Some((data, _)) => Outcome::Success(data.clone()),
                None => fail!(format!("no such object: {path}")),
            }
        }

        async fn get_etag(&self, path: &S3Path) -> Outcome<Option<String>> {
            let mut inner = self.inner.lock().expect("lock poisoned");
            inner.calls.push(BlobCall::GetEtag(path.clone()));
            Outcome::Success(inner.objects.get(&addr(path)).map(|(_, etag)| etag.clone()))
        }

        async fn put_object(&self, path: &S3Path, data: Vec<u8>) -> Outcome<()> {
            let mut inner = self.inner.lock().expect("lock poisoned");
            inner.calls.push(BlobCall::Put(path.clone(), data.clone()));
            let etag = hex_digest(&data);
            inner.objects.insert(addr(path), (data, etag));
            Outcome::Success(())
        }
    }
}

#[cfg(test)]
#[path = "blob_tests.rs"]
mod tests;
