// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sends a Message out through its head Step's Trigger.

use std::path::Path;
use std::sync::Arc;

use md5::{Digest, Md5};

use npipes_adapters::{BlobStore, HttpClient, HttpMethod, LambdaInvoker, QueueClient, TopicClient};
use npipes_codec::convert_to_legacy;
use npipes_core::{fail, Message, Outcome, Protocol, Trigger};

use crate::overflow::overflow;
use crate::util::random_name;

/// Collaborators the Trigger Dispatcher sends through. Held as `Arc`s so a
/// single set can be shared across concurrently-dispatched messages.
pub struct TriggerDispatcher {
    pub queues: Arc<dyn QueueClient>,
    pub topics: Arc<dyn TopicClient>,
    pub lambdas: Arc<dyn LambdaInvoker>,
    pub http: Arc<dyn HttpClient>,
    pub blobs: Arc<dyn BlobStore>,
}

impl TriggerDispatcher {
    /// Sends `message` through its own head step's Trigger, selecting the
    /// wire format from that same head step's Protocol. If `message` has no
    /// steps left, its sentinel head step defaults to `Protocol::Npipes`
    /// and `Trigger::Nothing`.
    pub async fn send(&self, message: Message) -> Outcome<()> {
        let head = message.header.peek_step(0);
        match head.trigger {
            Trigger::Nothing => Outcome::Success(()),
            Trigger::Sqs { queue_name, overflow_path } => self.send_sqs(message, &queue_name, &overflow_path).await,
            Trigger::Sns { topic } => {
                let body = match wire_format(&message) {
                    Outcome::Success(body) => body,
                    Outcome::Failure(reason) => return Outcome::Failure(reason),
                };
                self.topics.publish(&topic, body).await
            }
            Trigger::Get { uri } => self.send_http(&message, HttpMethod::Get, &uri).await,
            Trigger::Post { uri } => self.send_http(&message, HttpMethod::Post, &uri).await,
            Trigger::Lambda { name } => self.send_lambda(&message, &name).await,
            Trigger::Filesystem { dir } => self.send_filesystem(&message, &dir).await,
        }
    }

    async fn send_sqs(&self, message: Message, queue_name: &str, overflow_path: &str) -> Outcome<()> {
        let message = match overflow(message, overflow_path, self.blobs.as_ref()).await {
            Outcome::Success(message) => message,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        let body = match wire_format(&message) {
            Outcome::Success(body) => body,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        let reported_md5 = match self.queues.send_message(queue_name, body.clone()).await {
            Outcome::Success(md5) => md5,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        if reported_md5 == hex_md5(&body) {
            Outcome::Success(())
        } else {
            fail!("Enqueued message MD5 does not match what was sent")
        }
    }

    async fn send_http(&self, message: &Message, method: HttpMethod, uri: &str) -> Outcome<()> {
        let body = match wire_format(message) {
            Outcome::Success(body) => body,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        self.http.send(method, uri, body.into_bytes()).await
    }

    async fn send_lambda(&self, message: &Message, name: &str) -> Outcome<()> {
        let body = match wire_format(message) {
            Outcome::Success(body) => body,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        match self.lambdas.invoke_event(name, body.into_bytes()).await {
            Outcome::Success(result) if result.status_code == 202 => Outcome::Success(()),
            Outcome::Success(result) => fail!(format!(
                "Lambda invocation failure; function: {name}; error: {:?}",
                result.function_error
            )),
            Outcome::Failure(reason) => Outcome::Failure(reason),
        }
    }

    async fn send_filesystem(&self, message: &Message, dir: &str) -> Outcome<()> {
        let body = match wire_format(message) {
            Outcome::Success(body) => body,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        let path = Path::new(dir).join(random_name());
        match std::fs::write(&path, body) {
            Ok(()) => Outcome::Success(()),
            Err(e) => fail!(format!("TriggerFilesystem.sendMessage: {e}")),
        }
    }
}

/// Renders `message` for the wire, choosing between the legacy envelope and
/// the minimal JSON-lines form based on its own head step's Protocol.
fn wire_format(message: &Message) -> Outcome<String> {
    match message.header.peek_step(0).protocol {
        Protocol::LegacyEnvelope => convert_to_legacy(message),
        Protocol::Npipes => Outcome::Success(message.to_min_json_lines()),
    }
}

fn hex_md5(body: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(body.as_bytes());
    hasher.finalize().iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
