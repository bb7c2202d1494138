// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn publish_always_succeeds_and_is_recorded() {
    let client = FakeTopicClient::new();
    let result = client.publish("arn:aws:sns:us-east-1:1:topic", "hi".to_string()).await;
    assert!(result.is_success());
    assert_eq!(
        client.published(),
        vec![("arn:aws:sns:us-east-1:1:topic".to_string(), "hi".to_string())]
    );
}
