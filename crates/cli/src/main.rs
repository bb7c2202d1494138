// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! npipes - distributed message-driven pipeline runtime

mod config;
mod producers;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use npipes_adapters::{AwsLambdaInvoker, ReqwestHttpClient, S3BlobStore, SnsTopicClient, SqsQueueClient};
use npipes_core::Outcome;
use npipes_engine::{EngineLoop, TriggerDispatcher};
use npipes_producer::Producer;

use crate::producers::CommandLineOverride;

#[derive(Parser)]
#[command(name = "npipes", version, about = "Distributed message-driven pipeline runtime")]
struct Cli {
    /// Path to the on-disk configuration file; `NPIPES_*` env vars always win.
    #[arg(long, default_value = ".npipesrc")]
    config: PathBuf,

    /// Single Message text (Commandline Producer only).
    #[arg(long)]
    message: Option<String>,

    /// Path to a file holding a single Message (Commandline Producer only).
    #[arg(long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_configuration(&cli.config)?;

    let commandline = match (cli.message, cli.file) {
        (Some(text), _) => CommandLineOverride::Message(text),
        (None, Some(path)) => CommandLineOverride::File(path),
        (None, None) => CommandLineOverride::Stdin,
    };

    let workdir = std::env::temp_dir();
    let mut producer = producers::build_producer(&config, commandline, workdir).await?;

    let dispatcher = TriggerDispatcher {
        queues: Arc::new(SqsQueueClient::from_env().await),
        topics: Arc::new(SnsTopicClient::from_env().await),
        lambdas: Arc::new(AwsLambdaInvoker::from_env().await),
        http: Arc::new(ReqwestHttpClient::new()),
        blobs: Arc::new(S3BlobStore::from_env().await),
    };

    let engine = EngineLoop {
        blobs: Arc::clone(&dispatcher.blobs),
        http: Arc::clone(&dispatcher.http),
        configuration: config,
        dispatcher,
    };

    while let Some(message) = producer.next().await {
        let outcome = engine.process(message.clone()).await;
        if let Outcome::Failure(ref reason) = outcome {
            tracing::error!(error = %reason, "message processing failed");
        }
        producer.report(&message, &outcome).await;
    }

    Ok(())
}
