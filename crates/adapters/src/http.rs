// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport shared by the Get/Post triggers and the URI Asset fetch.
//!
//! No original implementation exists for the trigger hop (the Python source
//! delegates to a `triggers.uri` module that was never checked in), and the
//! URI asset fetch was itself left as a TODO stub (`localizeUriAsset` in
//! `assets.py` just returns `Success(target)` without ever downloading
//! anything). Both request/response shapes here are new, built against
//! `reqwest`. Success for `send` is any 2xx response, by analogy with the
//! Lambda adapter's status-code gate.

use async_trait::async_trait;
use npipes_core::{fail, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Fire-and-forget request used by the Get/Post triggers: the response
    /// body is discarded, only its status matters.
    async fn send(&self, method: HttpMethod, uri: &str, body: Vec<u8>) -> Outcome<()>;

    /// Fetches `uri`'s body, used to localize a URI Asset.
    async fn get_bytes(&self, uri: &str) -> Outcome<Vec<u8>>;
}

pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        ReqwestHttpClient {
            client: reqwest::Client::new(),
        }
    }
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, method: HttpMethod, uri: &str, body: Vec<u8>) -> Outcome<()> {
        let request = match method {
            HttpMethod::Get => self.client.get(uri).body(body),
            HttpMethod::Post => self.client.post(uri).body(body),
        };
        match request.send().await {
            Ok(resp) if resp.status().is_success() => Outcome::Success(()),
            Ok(resp) => fail!(format!("trigger request to {uri} failed: HTTP {}", resp.status())),
            Err(e) => fail!(format!("unable to reach {uri}: {e}")),
        }
    }

    async fn get_bytes(&self, uri: &str) -> Outcome<Vec<u8>> {
        match self.client.get(uri).send().await {
            Ok(resp) if resp.status().is_success() => match resp.bytes().await {
                Ok(bytes) => Outcome::Success(bytes.to_vec()),
                Err(e) => fail!(format!("unable to read response body from {uri}: {e}")),
            },
            Ok(resp) => fail!(format!("fetching {uri} failed: HTTP {}", resp.status())),
            Err(e) => fail!(format!("unable to reach {uri}: {e}")),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeHttpClient;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub struct HttpCall {
        pub method: HttpMethod,
        pub uri: String,
        pub body: Vec<u8>,
    }

    #[derive(Default)]
    pub struct FakeHttpClient {
        calls: Mutex<Vec<HttpCall>>,
        fail_next: Mutex<bool>,
        responses: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl FakeHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<HttpCall> {
            self.calls.lock().expect("lock poisoned").clone()
        }

        pub fn fail_next(&self) {
            *self.fail_next.lock().expect("lock poisoned") = true;
        }

        /// Seeds the bytes `get_bytes` returns for `uri`. Defaults to an
        /// empty body for any unseeded `uri`.
        pub fn seed(&self, uri: impl Into<String>, body: Vec<u8>) {
            self.responses.lock().expect("lock poisoned").insert(uri.into(), body);
        }
    }

    #[async_trait]
    impl HttpClient for FakeHttpClient {
        async fn send(&self, method: HttpMethod, uri: &str, body: Vec<u8>) -> Outcome<()> {
            self.calls.lock().expect("lock poisoned").push(HttpCall {
                method,
                uri: uri.to_string(),
                body,
            });
            let mut fail_next = self.fail_next.lock().expect("lock poisoned");
            if *fail_next {
                *fail_next = false;
                return fail!(format!("trigger request to {uri} failed: HTTP 500"));
            }
            Outcome::Success(())
        }

        async fn get_bytes(&self, uri: &str) -> Outcome<Vec<u8>> {
            self.calls.lock().expect("lock poisoned").push(HttpCall {
                method: HttpMethod::Get,
                uri: uri.to_string(),
                body: Vec::new(),
            });
            let mut fail_next = self.fail_next.lock().expect("lock poisoned");
            if *fail_next {
                *fail_next = false;
                return fail!(format!("fetching {uri} failed: HTTP 500"));
            }
            Outcome::Success(self.responses.lock().expect("lock poisoned").get(uri).cloned().unwrap_or_default())
        }
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
