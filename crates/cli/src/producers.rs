// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Selects a `Producer` implementation by name, replacing
//! `original_source/npipes/main.py`'s `importlib.import_module` registry
//! with a static match on `Configuration.producer`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use npipes_core::serialize::{get_bool, get_str, get_u64};
use npipes_core::Configuration;
use npipes_producer::{AwsSqsPoller, CommandLineProducer, CommandLineSource, FilesystemProducer, Producer, SqsProducer};

/// Extra source for the Commandline Producer, taken from CLI flags rather
/// than `producerArgs` (the original passes these through `argv`).
pub enum CommandLineOverride {
    Message(String),
    File(PathBuf),
    Stdin,
}

pub async fn build_producer(config: &Configuration, commandline: CommandLineOverride, workdir: PathBuf) -> Result<Box<dyn Producer>> {
    let args = Value::Object(config.producer_args.clone());

    match config.producer.as_str() {
        "sqs" => Ok(Box::new(build_sqs_producer(&args, config, workdir).await?)),
        "filesystem" => Ok(Box::new(build_filesystem_producer(&args, config, workdir)?)),
        "commandline" => Ok(Box::new(build_commandline_producer(commandline, config, workdir))),
        other => anyhow::bail!("unknown NPIPES_producer: {other:?} (expected sqs, filesystem, or commandline)"),
    }
}

async fn build_sqs_producer(args: &Value, config: &Configuration, workdir: PathBuf) -> Result<SqsProducer> {
    let queue_name = get_str(args, "queueName", "");
    if queue_name.is_empty() {
        anyhow::bail!("NPIPES_producerArgs.queueName is required for the sqs producer");
    }
    let max_number_of_messages = get_u64(args, "maxNumberOfMessages", 1) as i32;
    let poller = Arc::new(AwsSqsPoller::from_env().await);
    Ok(SqsProducer::new(poller, queue_name, max_number_of_messages, config.sqs_overflow_path.clone(), workdir))
}

fn build_filesystem_producer(args: &Value, config: &Configuration, workdir: PathBuf) -> Result<FilesystemProducer> {
    let dir = get_str(args, "dir", "");
    if dir.is_empty() {
        anyhow::bail!("NPIPES_producerArgs.dir is required for the filesystem producer");
    }
    let remove_successes = get_bool(args, "removeSuccesses", false);
    let remove_failures = get_bool(args, "removeFailures", false);
    let refresh_interval = refresh_interval_secs(args);
    let quit_when_empty = get_bool(args, "quitWhenEmpty", false);

    Ok(FilesystemProducer::new(
        PathBuf::from(dir),
        remove_successes,
        remove_failures,
        refresh_interval,
        quit_when_empty,
        config.sqs_overflow_path.clone(),
        workdir,
    ))
}

fn refresh_interval_secs(args: &Value) -> std::time::Duration {
    let secs = args.get("refreshInterval").and_then(Value::as_f64).unwrap_or(1.0);
    std::time::Duration::from_secs_f64(secs.max(0.0))
}

fn build_commandline_producer(commandline: CommandLineOverride, config: &Configuration, workdir: PathBuf) -> CommandLineProducer {
    let source = match commandline {
        CommandLineOverride::Message(text) => CommandLineSource::Message(text),
        CommandLineOverride::File(path) => CommandLineSource::File(path),
        CommandLineOverride::Stdin => CommandLineSource::Stdin,
    };
    CommandLineProducer::new(source, config.sqs_overflow_path.clone(), workdir)
}

#[cfg(test)]
#[path = "producers_tests.rs"]
mod tests;
