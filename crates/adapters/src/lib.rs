// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: blob storage, queues, topics, Lambda, HTTP,
//! and child processes. Every trait here is dumb transport; the business
//! logic that decides what to send and how to interpret the result lives in
//! `npipes-engine`.

pub mod blob;
pub mod http;
pub mod lambda;
pub mod queue;
pub mod subprocess;
pub mod topic;

pub use blob::{BlobStore, S3BlobStore};
pub use http::{HttpClient, HttpMethod, ReqwestHttpClient};
pub use lambda::{AwsLambdaInvoker, InvokeResult, LambdaInvoker};
pub use queue::{QueueClient, SqsQueueClient};
pub use subprocess::run_command;
pub use topic::{SnsTopicClient, TopicClient};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use blob::{BlobCall, FakeBlobStore};
#[cfg(any(test, feature = "test-support"))]
pub use http::FakeHttpClient;
#[cfg(any(test, feature = "test-support"))]
pub use lambda::FakeLambdaInvoker;
#[cfg(any(test, feature = "test-support"))]
pub use queue::FakeQueueClient;
#[cfg(any(test, feature = "test-support"))]
pub use topic::FakeTopicClient;
