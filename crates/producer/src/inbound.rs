// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared inbound parsing: every Producer accepts either the native
//! JSON-lines wire format or the legacy EZQ envelope.

use std::path::{Path, PathBuf};

use npipes_codec::{convert_from_legacy, is_legacy_envelope};
use npipes_core::{Message, Outcome};

/// Parses a raw message body, dispatching on whether it's wrapped in the
/// legacy envelope. Legacy conversion writes extra temp files (the
/// full-message dump and the output placeholder) into `workdir`; the
/// returned paths are the caller's to remove once it's done with the
/// resulting Message.
pub fn parse_inbound(raw: &str, sqs_overflow_path: &str, workdir: &Path) -> Outcome<(Message, Vec<PathBuf>)> {
    if is_legacy_envelope(raw) {
        convert_from_legacy(raw, sqs_overflow_path, workdir)
    } else {
        match Message::from_json_lines(raw) {
            Outcome::Success(message) => Outcome::Success((message, Vec::new())),
            Outcome::Failure(reason) => Outcome::Failure(reason),
        }
    }
}

#[cfg(test)]
#[path = "inbound_tests.rs"]
mod tests;
