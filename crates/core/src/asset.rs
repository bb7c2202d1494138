// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Non-local assets that must be localized before a Step's Command runs.

use serde_json::{json, Value};

use crate::s3path::S3Path;
use crate::serialize::{get_bool, get_str, Serializable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decompression {
    pub decompress: bool,
}

impl Serializable for Decompression {
    fn to_value(&self) -> Value {
        json!({"decompress": self.decompress})
    }

    fn from_value(v: &Value) -> Self {
        Decompression {
            decompress: get_bool(v, "decompress", false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetSettings {
    pub id: String,
    pub decompression: Decompression,
    pub local_target: String,
}

impl Serializable for AssetSettings {
    fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "decompression": self.decompression.to_value(),
            "localTarget": self.local_target,
        })
    }

    fn from_value(v: &Value) -> Self {
        AssetSettings {
            id: get_str(v, "id", ""),
            decompression: Decompression::from_value(v.get("decompression").unwrap_or(&Value::Null)),
            local_target: get_str(v, "localTarget", ""),
        }
    }
}

impl AssetSettings {
    fn min_value(&self) -> Value {
        // settings is nested inline under the Asset variant (not under a
        // Serializable default diff of its own), matching the original's
        // `_toMinDict` override that calls `self.settings._toMinDict()`.
        crate::serialize::diff_against_default(&self.to_value(), &AssetSettings::default().to_value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    S3 { path: S3Path, settings: AssetSettings },
    Uri { uri: String, settings: AssetSettings },
}

impl Asset {
    pub const S3_TAG: &'static str = "S3";
    pub const URI_TAG: &'static str = "Uri";

    pub fn settings(&self) -> &AssetSettings {
        match self {
            Asset::S3 { settings, .. } => settings,
            Asset::Uri { settings, .. } => settings,
        }
    }

    /// The default local target for this asset's variant, before
    /// `AssetSettings.localTarget` is consulted.
    pub fn default_local_target(&self) -> String {
        match self {
            Asset::S3 { path, .. } => path.key.clone(),
            Asset::Uri { uri, .. } => uri.rsplit('/').next().unwrap_or(uri).to_string(),
        }
    }

    /// `AssetSettings.localTarget` if non-empty, else the variant default.
    pub fn decide_local_target(&self) -> String {
        let local = &self.settings().local_target;
        if local.is_empty() {
            self.default_local_target()
        } else {
            local.clone()
        }
    }

    /// Everything past the first `.` in the decided local target's leaf
    /// filename, e.g. `a_file.json.gz` -> `json.gz`; empty if there is none.
    pub fn raw_extension(&self) -> String {
        let target = self.decide_local_target();
        let leaf = target.rsplit('/').next().unwrap_or(&target);
        match leaf.split_once('.') {
            Some((_, rest)) => rest.to_string(),
            None => String::new(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Asset::S3 { path, settings } => json!({
                "path": path.to_string(),
                "type": Self::S3_TAG,
                "settings": settings.to_value(),
            }),
            Asset::Uri { uri, settings } => json!({
                "uri": uri,
                "type": Self::URI_TAG,
                "settings": settings.to_value(),
            }),
        }
    }

    pub fn min_to_value(&self) -> Value {
        let mut v = self.to_value();
        let settings = self.settings().min_value();
        if let Value::Object(m) = &mut v {
            m.insert("settings".to_string(), settings);
        }
        v
    }

    pub fn from_value(v: &Value) -> Self {
        let typ = get_str(v, "type", "uri").to_lowercase();
        let settings = AssetSettings::from_value(v.get("settings").unwrap_or(&Value::Null));
        if typ == "s3" {
            Asset::S3 {
                path: S3Path::parse(&get_str(v, "path", "")),
                settings,
            }
        } else {
            Asset::Uri {
                uri: get_str(v, "uri", ""),
                settings,
            }
        }
    }
}

#[cfg(test)]
#[path = "asset_tests.rs"]
mod tests;
