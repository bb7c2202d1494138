// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural dict<->struct conversion, minimal-diff encoding, and
//! dotted-path record update.
//!
//! `serde_json::Value` plays the role of the structural "dict" described in
//! the design: every persistable type implements [`Serializable`] by hand
//! (sum types need exact wire discriminator spellings that serde's default
//! externally-tagged representation does not produce) rather than relying
//! solely on `#[derive(Serialize, Deserialize)]`.

use serde_json::{Map, Value};

/// A type that can be converted to and from a structural [`Value`]
/// representation, with defensive defaults on missing keys.
pub trait Serializable: Default {
    /// Full structural representation.
    fn to_value(&self) -> Value;

    /// Inverse of [`Serializable::to_value`]; missing keys fall back to the
    /// type's default field values rather than erroring.
    fn from_value(v: &Value) -> Self;

    /// Diff against the default-constructed instance: keys whose value
    /// equals the default, and empty nested mappings, are omitted.
    fn min_to_value(&self) -> Value {
        diff_against_default(&self.to_value(), &Self::default().to_value())
    }
}

/// Recursively drops keys from `full` that are equal to the corresponding
/// key in `default`; recurses into nested objects so their own redundant
/// keys are dropped too, and omits a nested object entirely if it becomes
/// empty.
pub fn diff_against_default(full: &Value, default: &Value) -> Value {
    match (full, default) {
        (Value::Object(fo), Value::Object(defo)) => {
            let mut out = Map::new();
            for (k, v) in fo {
                match defo.get(k) {
                    Some(dv) if v.is_object() && dv.is_object() => {
                        let nested = diff_against_default(v, dv);
                        let keep_nested = nested.as_object().map(|m| !m.is_empty()).unwrap_or(true);
                        if keep_nested {
                            out.insert(k.clone(), nested);
                        }
                    }
                    Some(dv) => {
                        if v != dv {
                            out.insert(k.clone(), v.clone());
                        }
                    }
                    None => {
                        out.insert(k.clone(), v.clone());
                    }
                }
            }
            Value::Object(out)
        }
        _ => full.clone(),
    }
}

/// Applies a dotted-path record update on top of a `Value` tree in place.
/// Missing intermediate nodes are a caller error; we simply no-op rather
/// than panic, since behavior there is explicitly undefined.
pub fn set_path(value: &mut Value, path: &str, new_value: Value) {
    let path = path.strip_prefix('.').unwrap_or(path);
    let parts: Vec<&str> = path.split('.').collect();
    set_path_parts(value, &parts, new_value);
}

fn set_path_parts(value: &mut Value, parts: &[&str], new_value: Value) {
    let Some((head, rest)) = parts.split_first() else {
        return;
    };
    if rest.is_empty() {
        match value {
            Value::Object(m) => {
                m.insert((*head).to_string(), new_value);
            }
            Value::Array(a) => {
                if let Ok(idx) = head.parse::<usize>() {
                    if idx < a.len() {
                        a[idx] = new_value;
                    }
                }
            }
            _ => {}
        }
        return;
    }
    match value {
        Value::Object(m) => {
            if let Some(child) = m.get_mut(*head) {
                set_path_parts(child, rest, new_value);
            }
        }
        Value::Array(a) => {
            if let Ok(idx) = head.parse::<usize>() {
                if let Some(child) = a.get_mut(idx) {
                    set_path_parts(child, rest, new_value);
                }
            }
        }
        _ => {}
    }
}

/// Applies a list of `(path, value)` record updates to `v`, reconstructing
/// via `from_value`. Never mutates `v` in place.
pub fn record_update<T: Serializable>(v: &T, updates: &[(&str, Value)]) -> T {
    let mut value = v.to_value();
    for (path, new_value) in updates {
        set_path(&mut value, path, new_value.clone());
    }
    T::from_value(&value)
}

/// Helpers for defensive field extraction used throughout the hand-rolled
/// `from_value` impls.
pub fn get_str(v: &Value, key: &str, default: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

pub fn get_bool(v: &Value, key: &str, default: bool) -> bool {
    v.get(key).and_then(Value::as_bool).unwrap_or(default)
}

pub fn get_u64(v: &Value, key: &str, default: u64) -> u64 {
    v.get(key).and_then(Value::as_u64).unwrap_or(default)
}

pub fn get_array<'a>(v: &'a Value, key: &str) -> &'a [Value] {
    v.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

#[cfg(test)]
#[path = "serialize_tests.rs"]
mod tests;
