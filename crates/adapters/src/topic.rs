// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SNS publish adapter.
//!
//! SNS's `publish` API carries no success/failure signal in its response, so
//! (matching `sns.py`) a publish that doesn't return an error is treated as
//! Success unconditionally.

use async_trait::async_trait;
use npipes_core::{fail, Outcome};

#[async_trait]
pub trait TopicClient: Send + Sync {
    async fn publish(&self, topic_arn: &str, message: String) -> Outcome<()>;
}

pub struct SnsTopicClient {
    client: aws_sdk_sns::Client,
}

impl SnsTopicClient {
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        SnsTopicClient { client }
    }

    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        SnsTopicClient::new(aws_sdk_sns::Client::new(&config))
    }
}

#[async_trait]
impl TopicClient for SnsTopicClient {
    async fn publish(&self, topic_arn: &str, message: String) -> Outcome<()> {
        match self.client.publish().topic_arn(topic_arn).message(message).send().await {
            Ok(_) => Outcome::Success(()),
            Err(e) => fail!(format!("unable to publish to {topic_arn}: {e}")),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeTopicClient;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeTopicClient {
        published: Mutex<Vec<(String, String)>>,
    }

    impl FakeTopicClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn published(&self) -> Vec<(String, String)> {
            self.published.lock().expect("lock poisoned").clone()
        }
    }

    #[async_trait]
    impl TopicClient for FakeTopicClient {
        async fn publish(&self, topic_arn: &str, message: String) -> Outcome<()> {
            self.published
                .lock()
                .expect("lock poisoned")
                .push((topic_arn.to_string(), message));
            Outcome::Success(())
        }
    }
}

#[cfg(test)]
#[path = "topic_tests.rs"]
mod tests;
