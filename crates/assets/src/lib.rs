// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! npipes-assets: the Asset Localizer. Downloads a Step's Assets
//! concurrently, decompresses where requested, and renames each into its
//! final local target.

pub mod decompress;
pub mod localize;

pub use decompress::decompress;
pub use localize::localize_assets;
