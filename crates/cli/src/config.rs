// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered configuration: an on-disk JSON file overlaid with `NPIPES_*`
//! environment variables, env always winning. Grounded on
//! `original_source/npipes/main.py`'s `getFileConfig`/`getEnv`/`liftConfig`.

use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{Map, Value};

use npipes_core::{Configuration, Serializable};

const ENV_KEYS: &[&str] = &[
    "NPIPES_command",
    "NPIPES_lockCommand",
    "NPIPES_commandValidator",
    "NPIPES_producer",
    "NPIPES_producerArgs",
    "NPIPES_SqsOverflowPath",
];

/// Reads `path` if present (else treats it as an empty object), then
/// overlays any `NPIPES_*` environment variables that are set.
pub fn load_configuration(path: &Path) -> Result<Configuration> {
    let mut merged = read_file_config(path)?;
    overlay_env(&mut merged);
    Ok(Configuration::from_value(&Value::Object(merged)))
}

fn read_file_config(path: &Path) -> Result<Map<String, Value>> {
    if !path.is_file() {
        return Ok(Map::new());
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("unable to read config file {}", path.display()))?;
    let value: Value = serde_json::from_str(&text).with_context(|| format!("config file {} is not valid JSON", path.display()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("config file {} must contain a JSON object", path.display()),
    }
}

fn overlay_env(merged: &mut Map<String, Value>) {
    for key in ENV_KEYS {
        let Ok(raw) = std::env::var(key) else {
            continue;
        };
        let value = match *key {
            "NPIPES_lockCommand" => Value::Bool(raw.eq_ignore_ascii_case("true")),
            "NPIPES_command" | "NPIPES_producerArgs" => decode_b64_json(key, &raw),
            _ => Value::String(raw),
        };
        merged.insert((*key).to_string(), value);
    }
}

/// `NPIPES_command`/`NPIPES_producerArgs` carry base64-encoded JSON since
/// env vars can only hold strings. Falls back to `Value::Null` on decode
/// failure rather than aborting startup over one malformed override.
fn decode_b64_json(key: &str, raw: &str) -> Value {
    let Ok(bytes) = BASE64.decode(raw) else {
        tracing::error!(%key, "NPIPES_* env var is not valid base64, ignoring");
        return Value::Null;
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(%key, error = %e, "NPIPES_* env var did not decode to JSON, ignoring");
            Value::Null
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
