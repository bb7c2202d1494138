// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Orchestrates one Message's lifecycle end to end: pop a Step, localize its
//! Assets, expand and run its Command, then dispatch the successor Message
//! through the next Step's Trigger.

use std::path::PathBuf;
use std::sync::Arc;

use npipes_adapters::{BlobStore, HttpClient};
use npipes_assets::localize_assets;
use npipes_core::{fail, Body, Configuration, Encoding, Header, Message, Outcome, Serializable, Step};

use crate::autodeleter::AutoDeleter;
use crate::dispatch::TriggerDispatcher;
use crate::expand::{asset_targets, expand_command, ExpandContext};
use crate::extract::extract_body;
use crate::scrape::run_and_scrape;
use crate::util::random_name;

/// The collaborators a single Engine Loop iteration needs.
pub struct EngineLoop {
    pub configuration: Configuration,
    pub blobs: Arc<dyn BlobStore>,
    pub http: Arc<dyn HttpClient>,
    pub dispatcher: TriggerDispatcher,
}

impl EngineLoop {
    /// Runs one full iteration for `message`, returning the scraped command
    /// output on success. Failures are returned, never panicked on — the
    /// caller (the `npipes` binary's run loop) reports the Outcome to the
    /// Producer and continues with the next Message regardless.
    pub async fn process(&self, message: Message) -> Outcome<String> {
        let (step, remaining_header) = message.header.pop_step();

        let workdir = std::env::temp_dir().join(format!("npipes-{}", random_name()));
        if let Err(e) = std::fs::create_dir_all(&workdir) {
            return fail!(format!("unable to create working directory {}: {e}", workdir.display()));
        }

        let mut cleanup = AutoDeleter::new();
        let outcome = self
            .run_step(&step, remaining_header, message.body, &workdir, &mut cleanup)
            .await;
        drop(cleanup);
        let _ = std::fs::remove_dir(&workdir);
        outcome
    }

    async fn run_step(
        &self,
        step: &Step,
        remaining_header: Header,
        body: Body,
        workdir: &std::path::Path,
        cleanup: &mut AutoDeleter,
    ) -> Outcome<String> {
        let localized = match localize_assets(&step.assets, Arc::clone(&self.blobs), Arc::clone(&self.http), workdir).await {
            Outcome::Success(paths) => paths,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };
        cleanup.add_all(localized.iter().cloned());

        let localized_pairs: Vec<(String, PathBuf)> = step
            .assets
            .iter()
            .zip(localized.iter())
            .map(|(asset, path)| (asset.settings().id.clone(), path.clone()))
            .collect();

        let body_string = match extract_body(&body, &localized_pairs) {
            Outcome::Success(s) => s,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };

        let bodyfile = cleanup.add(workdir.join(format!("body-{}", random_name())));
        if let Err(e) = std::fs::write(&bodyfile, &body_string) {
            return fail!(format!("unable to write body file {}: {e}", bodyfile.display()));
        }

        let headerfile = cleanup.add(workdir.join(format!("header-{}", random_name())));
        if let Err(e) = std::fs::write(&headerfile, remaining_header.to_value().to_string()) {
            return fail!(format!("unable to write header file {}: {e}", headerfile.display()));
        }

        let outputfile = cleanup.add(workdir.join(format!("output-{}", random_name())));

        let targets = asset_targets(&step.assets, &localized);
        let ctx = ExpandContext {
            bodyfile: &bodyfile,
            headerfile: &headerfile,
            outputfile: &outputfile,
            pid: self.configuration.pid,
            body: &body_string,
            asset_targets: &targets,
        };

        let command = if self.configuration.lock_command {
            &self.configuration.command
        } else {
            &step.command
        };
        let expanded = expand_command(command, &ctx);

        let scraped = match run_and_scrape(&expanded, &body_string).await {
            Outcome::Success(output) => output,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        };

        let successor = Message {
            header: remaining_header,
            body: Body::InString {
                string: scraped.clone(),
                encoding: Encoding::PlainText,
            },
        };

        match self.dispatcher.send(successor).await {
            Outcome::Success(()) => Outcome::Success(scraped),
            Outcome::Failure(reason) => Outcome::Failure(reason),
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
