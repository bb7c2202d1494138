// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolves a Message's Body to a plain string for command expansion.

use std::fs;
use std::path::Path;

use npipes_core::{fail, from_gz_b64, Body, Encoding, Outcome};

/// Extracts `body`'s contents as a string. `InString`+`PlainText` is
/// returned as-is; `InString`+`GzB64` is base64-then-gunzip decoded;
/// `InAsset` reads the already-localized path matching its asset id
/// (`localized` pairs each step asset id with the path it was localized
/// to — built by the same zip [`crate::expand::asset_targets`] uses). No
/// asset in the step carries that id: a defensive empty string, matching
/// the original's fallthrough for an unmatched asset id.
pub fn extract_body(body: &Body, localized: &[(String, impl AsRef<Path>)]) -> Outcome<String> {
    match body {
        Body::InString { string, encoding } => match encoding {
            Encoding::PlainText => Outcome::Success(string.clone()),
            Encoding::GzB64 => from_gz_b64(string),
        },
        Body::InAsset { asset_id } => {
            let Some((_, path)) = localized.iter().find(|(id, _)| id == asset_id) else {
                return Outcome::Success(String::new());
            };
            match fs::read_to_string(path.as_ref()) {
                Ok(contents) => Outcome::Success(contents),
                Err(e) => fail!(format!("unable to read localized asset {}: {e}", path.as_ref().display())),
            }
        }
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
