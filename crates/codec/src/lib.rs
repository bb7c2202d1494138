// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! npipes-codec: the legacy envelope bridge between EZQ's YAML-preamble
//! wire format and npipes' native JSON-lines Message encoding.

pub mod envelope;

pub use envelope::{convert_from_legacy, convert_to_legacy, is_legacy_envelope};
