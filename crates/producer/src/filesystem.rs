// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem Producer: treats a directory as a queue, yielding each
//! regular file's contents in mtime order. Grounded on
//! `original_source/npipes/producers/filesystem.py`.

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use npipes_core::{Message, Outcome};

use crate::inbound::parse_inbound;
use crate::Producer;

pub struct FilesystemProducer {
    dir: PathBuf,
    remove_successes: bool,
    remove_failures: bool,
    refresh_interval: Duration,
    quit_when_empty: bool,
    sqs_overflow_path: String,
    workdir: PathBuf,
    processed: HashSet<PathBuf>,
    pending: VecDeque<PathBuf>,
    current: Option<(PathBuf, Vec<PathBuf>)>,
    exhausted: bool,
}

impl FilesystemProducer {
    pub fn new(
        dir: PathBuf,
        remove_successes: bool,
        remove_failures: bool,
        refresh_interval: Duration,
        quit_when_empty: bool,
        sqs_overflow_path: impl Into<String>,
        workdir: PathBuf,
    ) -> Self {
        FilesystemProducer {
            dir,
            remove_successes,
            remove_failures,
            refresh_interval,
            quit_when_empty,
            sqs_overflow_path: sqs_overflow_path.into(),
            workdir,
            processed: HashSet::new(),
            pending: VecDeque::new(),
            current: None,
            exhausted: false,
        }
    }

    /// Regular files in `dir`, not yet `processed`, oldest mtime first.
    fn scan(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut candidates: Vec<(PathBuf, std::time::SystemTime)> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && !self.processed.contains(p))
            .filter_map(|p| {
                let mtime = p.metadata().and_then(|m| m.modified()).ok()?;
                Some((p, mtime))
            })
            .collect();
        candidates.sort_by_key(|(_, mtime)| *mtime);
        candidates.into_iter().map(|(p, _)| p).collect()
    }
}

#[async_trait]
impl Producer for FilesystemProducer {
    async fn next(&mut self) -> Option<Message> {
        loop {
            while let Some(path) = self.pending.pop_front() {
                let raw = match std::fs::read_to_string(&path) {
                    Ok(raw) => raw,
                    Err(e) => {
                        tracing::error!(error = %e, path = %path.display(), "unable to read message file, skipping");
                        self.processed.insert(path);
                        continue;
                    }
                };
                match parse_inbound(&raw, &self.sqs_overflow_path, &self.workdir) {
                    Outcome::Success((message, extra_cleanup)) => {
                        self.current = Some((path, extra_cleanup));
                        return Some(message);
                    }
                    Outcome::Failure(reason) => {
                        tracing::error!(error = %reason, path = %path.display(), "malformed message, skipping");
                        self.processed.insert(path);
                    }
                }
            }

            if self.exhausted {
                return None;
            }

            self.pending = self.scan().into();
            if !self.pending.is_empty() {
                continue;
            }

            if self.quit_when_empty {
                self.exhausted = true;
                return None;
            }

            tokio::time::sleep(self.refresh_interval).await;
        }
    }

    async fn report(&mut self, _last: &Message, outcome: &Outcome<String>) {
        let Some((path, extra_cleanup)) = self.current.take() else {
            return;
        };
        for extra in &extra_cleanup {
            let _ = std::fs::remove_file(extra);
        }
        let remove = match outcome {
            Outcome::Success(_) => self.remove_successes,
            Outcome::Failure(_) => self.remove_failures,
        };
        if remove {
            let _ = std::fs::remove_file(&path);
        } else {
            self.processed.insert(path);
        }
    }
}

#[cfg(test)]
#[path = "filesystem_tests.rs"]
mod tests;
