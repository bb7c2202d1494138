// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! The Producer Protocol: a bidirectional stream of Messages. Each
//! implementation produces one Message at a time and is told the Outcome
//! of processing it before producing the next.

pub mod commandline;
pub mod filesystem;
pub mod inbound;
pub mod sqs;

pub use commandline::{CommandLineProducer, CommandLineSource};
pub use filesystem::FilesystemProducer;
pub use sqs::{AwsSqsPoller, QueuePoller, ReceivedMessage, SqsProducer};

use async_trait::async_trait;
use npipes_core::{Message, Outcome};

/// `next` yields `None` only when the source is permanently exhausted
/// (e.g. a `quitWhenEmpty` Filesystem Producer, or the Commandline
/// Producer after its one Message). `report` is always called with the
/// Message `next` most recently returned and the Outcome of running it
/// through the Engine Loop, before `next` is called again.
#[async_trait]
pub trait Producer: Send {
    async fn next(&mut self) -> Option<Message>;
    async fn report(&mut self, last: &Message, outcome: &Outcome<String>);
}
