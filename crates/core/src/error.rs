// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for classifying `Outcome::Failure` reasons in tests and logs.

use thiserror::Error;

/// The six failure kinds surfaced by the engine. `Display` renders the
/// message that becomes (after `track!` prefixing) an `Outcome::Failure`
/// reason.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NpipesError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("integrity failure: {0}")]
    Integrity(String),

    #[error("asset failure: {0}")]
    Asset(String),

    #[error("command failure: exit {code:?}, stdout: {stdout}, stderr: {stderr}")]
    Command {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("timeout failure: {0}")]
    Timeout(String),

    #[error("format failure: {0}")]
    Format(String),
}

impl NpipesError {
    pub fn kind(&self) -> NpipesErrorKind {
        match self {
            NpipesError::Transport(_) => NpipesErrorKind::Transport,
            NpipesError::Integrity(_) => NpipesErrorKind::Integrity,
            NpipesError::Asset(_) => NpipesErrorKind::Asset,
            NpipesError::Command { .. } => NpipesErrorKind::Command,
            NpipesError::Timeout(_) => NpipesErrorKind::Timeout,
            NpipesError::Format(_) => NpipesErrorKind::Format,
        }
    }
}

/// Tag-only companion of [`NpipesError`], for structured logging/matching
/// without carrying the (possibly large) payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NpipesErrorKind {
    Transport,
    Integrity,
    Asset,
    Command,
    Timeout,
    Format,
}

impl From<&NpipesError> for NpipesErrorKind {
    fn from(e: &NpipesError) -> Self {
        e.kind()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
