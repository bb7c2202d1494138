// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped cleanup stack: every path registered is unlinked when the guard
//! drops, regardless of which branch of the Engine Loop exits first.

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct AutoDeleter {
    paths: Vec<PathBuf>,
}

impl AutoDeleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` for deletion on drop, returning it back so calls
    /// can be chained inline at the point a path is created.
    pub fn add(&mut self, path: impl Into<PathBuf>) -> PathBuf {
        let path = path.into();
        self.paths.push(path.clone());
        path
    }

    /// Registers every path in `paths`, in order.
    pub fn add_all<I: IntoIterator<Item = P>, P: Into<PathBuf>>(&mut self, paths: I) {
        for path in paths {
            self.add(path);
        }
    }
}

impl Drop for AutoDeleter {
    fn drop(&mut self) {
        for path in &self.paths {
            if Path::new(path).is_file() {
                let _ = fs::remove_file(path);
            }
        }
    }
}

#[cfg(test)]
#[path = "autodeleter_tests.rs"]
mod tests;
