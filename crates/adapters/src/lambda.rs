// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lambda event-invocation adapter.
//!
//! Always invokes with `InvocationType=Event` (fire-and-forget), matching
//! `awsLambda.py`. The 202-vs-other status check that decides Success vs
//! Failure lives in the Trigger Dispatcher, not here — this adapter just
//! reports what the service said.

use async_trait::async_trait;
use npipes_core::{fail, Outcome};

/// What the Lambda service reported for an `Event`-type invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeResult {
    pub status_code: i32,
    pub function_error: Option<String>,
}

#[async_trait]
pub trait LambdaInvoker: Send + Sync {
    async fn invoke_event(&self, function_name: &str, payload: Vec<u8>) -> Outcome<InvokeResult>;
}

pub struct AwsLambdaInvoker {
    client: aws_sdk_lambda::Client,
}

impl AwsLambdaInvoker {
    pub fn new(client: aws_sdk_lambda::Client) -> Self {
        AwsLambdaInvoker { client }
    }

    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        AwsLambdaInvoker::new(aws_sdk_lambda::Client::new(&config))
    }
}

#[async_trait]
impl LambdaInvoker for AwsLambdaInvoker {
    async fn invoke_event(&self, function_name: &str, payload: Vec<u8>) -> Outcome<InvokeResult> {
        let resp = self
            .client
            .invoke()
            .function_name(function_name)
            .invocation_type(aws_sdk_lambda::types::InvocationType::Event)
            .payload(payload.into())
            .send()
            .await;
        match resp {
            Ok(output) => Outcome::Success(InvokeResult {
                status_code: output.status_code,
                function_error: output.function_error,
            }),
            Err(e) => fail!(format!("unable to invoke {function_name}: {e}")),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLambdaInvoker;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::Mutex;

    pub struct FakeLambdaInvoker {
        invocations: Mutex<Vec<(String, Vec<u8>)>>,
        next_result: Mutex<InvokeResult>,
    }

    impl Default for FakeLambdaInvoker {
        fn default() -> Self {
            FakeLambdaInvoker {
                invocations: Mutex::new(Vec::new()),
                next_result: Mutex::new(InvokeResult {
                    status_code: 202,
                    function_error: None,
                }),
            }
        }
    }

    impl FakeLambdaInvoker {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn invocations(&self) -> Vec<(String, Vec<u8>)> {
            self.invocations.lock().expect("lock poisoned").clone()
        }

        pub fn set_next_result(&self, result: InvokeResult) {
            *self.next_result.lock().expect("lock poisoned") = result;
        }
    }

    #[async_trait]
    impl LambdaInvoker for FakeLambdaInvoker {
        async fn invoke_event(&self, function_name: &str, payload: Vec<u8>) -> Outcome<InvokeResult> {
            self.invocations
                .lock()
                .expect("lock poisoned")
                .push((function_name.to_string(), payload));
            Outcome::Success(self.next_result.lock().expect("lock poisoned").clone())
        }
    }
}

#[cfg(test)]
#[path = "lambda_tests.rs"]
mod tests;
