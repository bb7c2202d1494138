// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-branch result value with explicit chaining.
//!
//! Every fallible operation in npipes returns an `Outcome<T>` rather than a
//! bare `Result`, so that failure reasons always carry the site marker added
//! by [`track!`](crate::track).

use std::fmt;

/// A two-branch value: either a successful `T`, or a `Failure` carrying a
/// free-form (but site-marked) reason string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(String),
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Outcome::Failure(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// `chain(x, f)`: Failure short-circuits, Success evaluates `f`.
    pub fn chain<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Success(v) => f(v),
            Outcome::Failure(reason) => Outcome::Failure(reason),
        }
    }

    /// Maps the success value without the possibility of failing.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(v) => Outcome::Success(f(v)),
            Outcome::Failure(reason) => Outcome::Failure(reason),
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_failure(self) -> Option<String> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(reason) => Some(reason),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Success(v) => Outcome::Success(v),
            Outcome::Failure(reason) => Outcome::Failure(reason.clone()),
        }
    }
}

impl<T> From<Result<T, String>> for Outcome<T> {
    fn from(r: Result<T, String>) -> Self {
        match r {
            Ok(v) => Outcome::Success(v),
            Err(reason) => Outcome::Failure(reason),
        }
    }
}

impl<T> fmt::Display for Outcome<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(v) => write!(f, "Success({:?})", v),
            Outcome::Failure(reason) => write!(f, "Failure({})", reason),
        }
    }
}

/// Captures `[<file>:<line>]` at the call site, matching the original
/// `track()` helper that walked `inspect.currentframe().f_back`.
#[macro_export]
macro_rules! track {
    ($msg:expr) => {
        format!("[{}:{}] {}", file!(), line!(), $msg)
    };
}

/// Builds a `Failure` whose reason is prefixed with the call site marker.
#[macro_export]
macro_rules! fail {
    ($msg:expr) => {
        $crate::Outcome::Failure($crate::track!($msg))
    };
}

/// Keeps only the `Failure` reasons from a sequence of outcomes, for
/// aggregate reporting (e.g. after a fan-out of independent operations).
pub fn map_failed<T>(outcomes: &[Outcome<T>]) -> Vec<&str> {
    outcomes
        .iter()
        .filter_map(|oc| match oc {
            Outcome::Failure(reason) => Some(reason.as_str()),
            Outcome::Success(_) => None,
        })
        .collect()
}

/// Keeps only the `Success` values from a sequence of outcomes.
pub fn map_succeeded<T>(outcomes: Vec<Outcome<T>>) -> Vec<T> {
    outcomes.into_iter().filter_map(Outcome::into_success).collect()
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
