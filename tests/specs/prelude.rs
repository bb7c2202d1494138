//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the `npipes` binary end-to-end.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};

/// Returns a `Command` for the `npipes` binary, resolved the way
/// `assert_cmd` resolves workspace binaries.
pub fn npipes_cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("npipes").expect("npipes binary should build")
}

/// Temporary project directory with helper methods for writing Messages
/// and reading them back.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn subdir(&self, name: &str) -> PathBuf {
        let p = self.dir.path().join(name);
        std::fs::create_dir_all(&p).expect("create subdir");
        p
    }

    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(full_path, content).expect("write file");
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(path.as_ref())).expect("read file")
    }
}
