// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sqs Producer: long-polls a queue, draining a local batch before
//! re-polling, grounded on `original_source/npipes/producers/sqs.py`.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use npipes_core::{fail, Message, Outcome};

use crate::inbound::parse_inbound;
use crate::Producer;

/// One message received off a queue, not yet acked.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub receipt_handle: String,
    pub body: String,
}

/// Transport boundary the Sqs Producer polls through. Kept separate from
/// `npipes-adapters::QueueClient`, which only ever sends — this is the
/// receive/delete/reset-visibility side of the same queue.
#[async_trait]
pub trait QueuePoller: Send + Sync {
    async fn receive(&self, queue_name: &str, max_messages: i32) -> Outcome<Vec<ReceivedMessage>>;
    async fn delete(&self, queue_name: &str, receipt_handle: &str) -> Outcome<()>;
    async fn reset_visibility(&self, queue_name: &str, receipt_handle: &str) -> Outcome<()>;
}

pub struct AwsSqsPoller {
    client: aws_sdk_sqs::Client,
}

impl AwsSqsPoller {
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        AwsSqsPoller { client }
    }

    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        AwsSqsPoller::new(aws_sdk_sqs::Client::new(&config))
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
impl QueuePoller for AwsSqsPoller {
    async fn receive(&self, queue_name: &str, max_messages: i32) -> Outcome<Vec<ReceivedMessage>> {
        let url = match self.queue_url(queue_name).await {
            Outcome::Success(url) => url,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        match self
            .client
            .receive_message()
            .queue_url(url)
            .max_number_of_messages(max_messages)
            .wait_time_seconds(20)
            .send()
            .await
        {
            Ok(output) => Outcome::Success(
                output
                    .messages
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|m| Some(ReceivedMessage {
                        receipt_handle: m.receipt_handle?,
                        body: m.body?,
                    }))
                    .collect(),
            ),
            Err(e) => fail!(format!("unable to poll queue {queue_name}: {e}")),
        }
    }

    async fn delete(&self, queue_name: &str, receipt_handle: &str) -> Outcome<()> {
        let url = match self.queue_url(queue_name).await {
            Outcome::Success(url) => url,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        match self.client.delete_message().queue_url(url).receipt_handle(receipt_handle).send().await {
            Ok(_) => Outcome::Success(()),
            Err(e) => fail!(format!("unable to delete message from {queue_name}: {e}")),
        }
    }

    async fn reset_visibility(&self, queue_name: &str, receipt_handle: &str) -> Outcome<()> {
        let url = match self.queue_url(queue_name).await {
            Outcome::Success(url) => url,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        match self
            .client
            .change_message_visibility()
            .queue_url(url)
            .receipt_handle(receipt_handle)
            .visibility_timeout(0)
            .send()
            .await
        {
            Ok(_) => Outcome::Success(()),
            Err(e) => fail!(format!("unable to reset visibility in {queue_name}: {e}")),
        }
    }
}

pub struct SqsProducer {
    poller: Arc<dyn QueuePoller>,
    queue_name: String,
    max_number_of_messages: i32,
    sqs_overflow_path: String,
    workdir: PathBuf,
    batch: VecDeque<ReceivedMessage>,
    /// Receipt handle plus any extra temp files the legacy-envelope
    /// converter wrote, awaiting the next `report`.
    current: Option<(String, Vec<PathBuf>)>,
}

impl SqsProducer {
    pub fn new(
        poller: Arc<dyn QueuePoller>,
        queue_name: impl Into<String>,
        max_number_of_messages: i32,
        sqs_overflow_path: impl Into<String>,
        workdir: PathBuf,
    ) -> Self {
        SqsProducer {
            poller,
            queue_name: queue_name.into(),
            max_number_of_messages,
            sqs_overflow_path: sqs_overflow_path.into(),
            workdir,
            batch: VecDeque::new(),
            current: None,
        }
    }
}

#[async_trait]
impl Producer for SqsProducer {
    async fn next(&mut self) -> Option<Message> {
        loop {
            while let Some(received) = self.batch.pop_front() {
                match parse_inbound(&received.body, &self.sqs_overflow_path, &self.workdir) {
                    Outcome::Success((message, extra_cleanup)) => {
                        self.current = Some((received.receipt_handle, extra_cleanup));
                        return Some(message);
                    }
                    Outcome::Failure(reason) => {
                        tracing::error!(error = %reason, queue = %self.queue_name, "malformed message, skipping");
                    }
                }
            }
            match self.poller.receive(&self.queue_name, self.max_number_of_messages).await {
                Outcome::Success(received) => self.batch.extend(received),
                Outcome::Failure(reason) => {
                    tracing::error!(error = %reason, queue = %self.queue_name, "failed to poll queue");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    async fn report(&mut self, _last: &Message, outcome: &Outcome<String>) {
        let Some((receipt_handle, extra_cleanup)) = self.current.take() else {
            return;
        };
        for path in &extra_cleanup {
            let _ = std::fs::remove_file(path);
        }
        let result = match outcome {
            Outcome::Success(_) => self.poller.delete(&self.queue_name, &receipt_handle).await,
            Outcome::Failure(_) => self.poller.reset_visibility(&self.queue_name, &receipt_handle).await,
        };
        if let Outcome::Failure(reason) = result {
            tracing::error!(error = %reason, queue = %self.queue_name, "failed to ack message");
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeQueuePoller;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeQueuePoller {
        inner: Mutex<FakeState>,
    }

    #[derive(Default)]
    struct FakeState {
        queued: VecDeque<ReceivedMessage>,
        deleted: Vec<String>,
        reset: Vec<String>,
    }

    impl FakeQueuePoller {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues `body` for the next `receive` call, returning the
        /// receipt handle it will be delivered with.
        pub fn seed(&self, body: impl Into<String>) -> String {
            let handle = uuid::Uuid::new_v4().to_string();
            self.inner.lock().expect("lock poisoned").queued.push_back(ReceivedMessage {
                receipt_handle: handle.clone(),
                body: body.into(),
            });
            handle
        }

        pub fn deleted(&self) -> Vec<String> {
            self.inner.lock().expect("lock poisoned").deleted.clone()
        }

        pub fn reset_calls(&self) -> Vec<String> {
            self.inner.lock().expect("lock poisoned").reset.clone()
        }
    }

    #[async_trait]
    impl QueuePoller for FakeQueuePoller {
        async fn receive(&self, _queue_name: &str, max_messages: i32) -> Outcome<Vec<ReceivedMessage>> {
            let mut inner = self.inner.lock().expect("lock poisoned");
            let mut out = Vec::new();
            for _ in 0..max_messages {
                match inner.queued.pop_front() {
                    Some(m) => out.push(m),
                    None => break,
                }
            }
            Outcome::Success(out)
        }

        async fn delete(&self, _queue_name: &str, receipt_handle: &str) -> Outcome<()> {
            self.inner.lock().expect("lock poisoned").deleted.push(receipt_handle.to_string());
            Outcome::Success(())
        }

        async fn reset_visibility(&self, _queue_name: &str, receipt_handle: &str) -> Outcome<()> {
            self.inner.lock().expect("lock poisoned").reset.push(receipt_handle.to_string());
            Outcome::Success(())
        }
    }
}

#[cfg(test)]
#[path = "sqs_tests.rs"]
mod tests;
