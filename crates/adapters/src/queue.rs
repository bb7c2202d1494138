// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SQS send-message adapter.
//!
//! Returns the service's reported `MD5OfMessageBody` rather than checking it
//! itself — the Trigger Dispatcher (in `npipes-engine`) owns the
//! compare-against-what-was-sent decision, matching `sqs.py`'s `sendMessage`.

use async_trait::async_trait;
use npipes_core::{fail, Outcome};

#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Sends `body` to the named queue, returning the MD5 the service
    /// computed over the enqueued body.
    async fn send_message(&self, queue_name: &str, body: String) -> Outcome<String>;
}

pub struct SqsQueueClient {
    client: aws_sdk_sqs::Client,
}

impl SqsQueueClient {
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        SqsQueueClient { client }
    }

    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        SqsQueueClient::new(aws_sdk_sqs::Client::new(&config))
    }

    async fn queue_url(&self, queue_name: &str) -> Outcome<String> {
        match self.client.get_queue_url().queue_name(queue_name).send().await {
            Ok(output) => match output.queue_url {
                Some(url) => Outcome::Success(url),
                None => fail!(format!("queue {queue_name} has no url")),
            },
            Err(e) => fail!(format!("unable to resolve queue {queue_name}: {e}")),
        }
    }
}

#[async_trait]
impl QueueClient for SqsQueueClient {
    async fn send_message(&self, queue_name: &str, body: String) -> Outcome<String> {
        let url = match self.queue_url(queue_name).await {
            Outcome::Success(url) => url,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        match self.client.send_message().queue_url(url).message_body(body).send().await {
            Ok(output) => match output.md5_of_message_body {
                Some(md5) => Outcome::Success(md5),
                None => fail!("SQS response carried no MD5OfMessageBody"),
            },
            Err(e) => fail!(format!("unable to send SQS message: {e}")),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeQueueClient;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use md5::{Digest, Md5};
    use std::sync::Mutex;

    /// Fake queue client. Computes a real MD5 over the body by default, so
    /// tests can also exercise the mismatch path via [`Self::corrupt_next`].
    #[derive(Default)]
    pub struct FakeQueueClient {
        inner: Mutex<FakeQueueState>,
    }

    #[derive(Default)]
    struct FakeQueueState {
        sent: Vec<(String, String)>,
        corrupt_next: bool,
    }

    impl FakeQueueClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sent(&self) -> Vec<(String, String)> {
            self.inner.lock().expect("lock poisoned").sent.clone()
        }

        /// Makes the next `send_message` call report a bogus MD5.
        pub fn corrupt_next(&self) {
            self.inner.lock().expect("lock poisoned").corrupt_next = true;
        }
    }

    #[async_trait]
    impl QueueClient for FakeQueueClient {
        async fn send_message(&self, queue_name: &str, body: String) -> Outcome<String> {
            let mut inner = self.inner.lock().expect("lock poisoned");
            inner.sent.push((queue_name.to_string(), body.clone()));
            if inner.corrupt_next {
                inner.corrupt_next = false;
                return Outcome::Success("0".repeat(32));
            }
            let mut hasher = Md5::new();
            hasher.update(body.as_bytes());
            let hex = hasher.finalize().iter().map(|b| format!("{b:02x}")).collect();
            Outcome::Success(hex)
        }
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
