// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Small helpers shared across the engine's modules.

/// A random 16-hex-character name, matching `secrets.token_hex(8)` in the
/// original — the same scheme `npipes-assets` uses for its own temp names.
pub fn random_name() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..16].to_string()
}
