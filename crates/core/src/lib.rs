// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! npipes-core: data model and shared primitives for the npipes pipeline
//! runtime.

pub mod asset;
pub mod body;
pub mod command;
pub mod configuration;
pub mod encoding;
pub mod error;
pub mod header;
pub mod message;
pub mod outcome;
pub mod protocol;
pub mod s3path;
pub mod serialize;
pub mod step;
pub mod trigger;

pub use asset::{Asset, AssetSettings, Decompression};
pub use body::Body;
pub use command::{Command, OutputChannel};
pub use configuration::Configuration;
pub use encoding::{from_gz_b64, gzip_bytes, to_gz_b64, Encoding};
pub use error::{NpipesError, NpipesErrorKind};
pub use header::Header;
pub use message::Message;
pub use outcome::{map_failed, map_succeeded, Outcome};
pub use protocol::Protocol;
pub use s3path::S3Path;
pub use serialize::{diff_against_default, record_update, set_path, Serializable};
pub use step::{Step, EMPTY_STEP_ID};
pub use trigger::Trigger;
