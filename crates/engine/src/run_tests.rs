// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use npipes_adapters::{FakeBlobStore, FakeHttpClient, FakeLambdaInvoker, FakeQueueClient, FakeTopicClient};
use npipes_core::{Command, Encoding, Trigger};

fn loop_with(configuration: Configuration) -> (EngineLoop, Arc<FakeQueueClient>) {
    let queues = Arc::new(FakeQueueClient::new());
    let dispatcher = TriggerDispatcher {
        queues: queues.clone(),
        topics: Arc::new(FakeTopicClient::new()),
        lambdas: Arc::new(FakeLambdaInvoker::new()),
        http: Arc::new(FakeHttpClient::new()),
        blobs: Arc::new(FakeBlobStore::new()),
    };
    let engine = EngineLoop {
        configuration,
        blobs: Arc::new(FakeBlobStore::new()),
        http: Arc::new(FakeHttpClient::new()),
        dispatcher,
    };
    (engine, queues)
}

#[tokio::test]
async fn runs_the_head_steps_command_and_dispatches_the_successor() {
    let head = Step {
        command: Command {
            arglist: vec!["echo".to_string(), "${bodycontents}".to_string()],
            ..Default::default()
        },
        ..Default::default()
    };
    let next = Step {
        trigger: Trigger::Sqs {
            queue_name: "downstream".to_string(),
            overflow_path: "s3://bucket/overflow".to_string(),
        },
        ..Default::default()
    };
    let message = Message {
        header: Header {
            encoding: Encoding::PlainText,
            steps: vec![head, next],
        },
        body: Body::InString {
            string: "hello".to_string(),
            encoding: Encoding::PlainText,
        },
    };

    let (engine, queues) = loop_with(Configuration {
        lock_command: false,
        ..Default::default()
    });

    let result = engine.process(message).await;
    let scraped = result.into_success().unwrap();
    assert_eq!(scraped.trim(), "hello");
    assert_eq!(queues.sent().len(), 1);
    assert_eq!(queues.sent()[0].0, "downstream");
}

#[tokio::test]
async fn locked_configuration_command_overrides_the_steps_own_command() {
    let head = Step {
        command: Command {
            arglist: vec!["false".to_string()],
            ..Default::default()
        },
        ..Default::default()
    };
    let message = Message {
        header: Header {
            encoding: Encoding::PlainText,
            steps: vec![head],
        },
        body: Body::InString {
            string: "hello".to_string(),
            encoding: Encoding::PlainText,
        },
    };

    let (engine, _queues) = loop_with(Configuration {
        lock_command: true,
        command: Command {
            arglist: vec!["echo".to_string(), "locked".to_string()],
            ..Default::default()
        },
        ..Default::default()
    });

    let scraped = engine.process(message).await.into_success().unwrap();
    assert_eq!(scraped.trim(), "locked");
}

#[tokio::test]
async fn a_failing_command_is_reported_as_a_failure_not_a_panic() {
    let head = Step {
        command: Command {
            arglist: vec!["false".to_string()],
            ..Default::default()
        },
        ..Default::default()
    };
    let message = Message {
        header: Header {
            encoding: Encoding::PlainText,
            steps: vec![head],
        },
        body: Body::InString {
            string: "hello".to_string(),
            encoding: Encoding::PlainText,
        },
    };

    let (engine, _queues) = loop_with(Configuration {
        lock_command: false,
        ..Default::default()
    });

    assert!(engine.process(message).await.is_failure());
}

#[tokio::test]
async fn a_message_with_no_steps_left_is_a_no_op_success() {
    let message = Message {
        header: Header::default(),
        body: Body::InString {
            string: "hello".to_string(),
            encoding: Encoding::PlainText,
        },
    };

    let (engine, queues) = loop_with(Configuration {
        lock_command: true,
        command: Command {
            arglist: vec!["echo".to_string(), "${bodycontents}".to_string()],
            ..Default::default()
        },
        ..Default::default()
    });

    let scraped = engine.process(message).await.into_success().unwrap();
    assert_eq!(scraped.trim(), "hello");
    assert!(queues.sent().is_empty());
}
