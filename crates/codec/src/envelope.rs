// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversion between the legacy EZQ YAML-preamble wire format and a
//! native [`Message`].
//!
//! EZQ has no concept of multi-step pipelines; a converted Message carries
//! at most two steps (the command, and an optional Sqs hop) plus whatever
//! `npipes_next_steps` the preamble tunnels through.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use npipes_core::serialize::{get_array, get_bool, get_str};
use npipes_core::{
    fail, Asset, AssetSettings, Body, Command, Decompression, Encoding, Header, Message, Outcome,
    OutputChannel, Protocol, Serializable, Step, Trigger,
};

const PREFIX: &str = "---\nEZQ";
const PREAMBLE_BODY_SEPARATOR: &str = "\n...\n";

/// True iff `s` begins with the exact legacy-envelope prefix.
pub fn is_legacy_envelope(s: &str) -> bool {
    s.starts_with(PREFIX)
}

/// Parses a legacy-envelope message string into a Message plus the paths
/// of temp files created along the way (the full-message dump and the
/// command's output file), which the caller must register with its own
/// cleanup stack.
pub fn convert_from_legacy(
    s: &str,
    sqs_overflow_path: &str,
    workdir: &Path,
) -> Outcome<(Message, Vec<PathBuf>)> {
    if !is_legacy_envelope(s) {
        return fail!("not a legacy envelope message");
    }
    let Some((preamble_str, body_str)) = s.split_once(PREAMBLE_BODY_SEPARATOR) else {
        return fail!("legacy envelope missing preamble/body separator");
    };

    let outer: Value = match serde_yaml::from_str(preamble_str) {
        Ok(v) => v,
        Err(e) => return fail!(format!("malformed legacy envelope YAML: {e}")),
    };
    let ezq = outer.get("EZQ").cloned().unwrap_or(Value::Null);

    let assets = make_assets(&ezq);
    let (body, assets) = make_body(body_str, &ezq, assets);

    let id = random_hex(4);
    let outfile = format!("output_{id}.txt");
    let full_msg_filename = format!("{}.ezq_full_msg", random_hex(8));
    let full_msg_path = workdir.join(&full_msg_filename);

    let arglist = substitute_npipes_markers(&full_msg_filename, make_arglist(&id, &ezq));
    let command = Command {
        arglist,
        output_channel: OutputChannel::File { filepath: outfile.clone() },
        ..Default::default()
    };
    let steps = make_steps(command, assets, &ezq, sqs_overflow_path);

    if let Outcome::Failure(reason) = write_full_message(&full_msg_path, &ezq, body_str) {
        return Outcome::Failure(reason);
    }

    let message = Message {
        header: Header {
            encoding: Encoding::PlainText,
            steps,
        },
        body,
    };
    Outcome::Success((message, vec![workdir.join(&outfile), full_msg_path]))
}

fn make_assets(ezq: &Value) -> Vec<Asset> {
    get_array(ezq, "get_s3_files")
        .iter()
        .enumerate()
        .map(|(idx, item)| s3_dict_to_asset(item, idx))
        .collect()
}

fn s3_dict_to_asset(d: &Value, idx: usize) -> Asset {
    let bucket = get_str(d, "bucket", "");
    let key = get_str(d, "key", "");
    let mut decompress = get_bool(d, "decompress", false);
    if key.ends_with(".gz") {
        decompress = true;
    }
    Asset::S3 {
        path: npipes_core::S3Path::new(bucket, key),
        settings: AssetSettings {
            id: format!("asset_{idx}"),
            decompression: Decompression { decompress },
            local_target: String::new(),
        },
    }
}

fn make_body(body_str: &str, ezq: &Value, mut assets: Vec<Asset>) -> (Body, Vec<Asset>) {
    match ezq.get("get_s3_file_as_body") {
        Some(d) => {
            let idx = assets.len();
            assets.push(s3_dict_to_asset(d, idx));
            (
                Body::InAsset {
                    asset_id: format!("asset_{idx}"),
                },
                assets,
            )
        }
        None => (
            Body::InString {
                string: body_str.to_string(),
                encoding: Encoding::PlainText,
            },
            assets,
        ),
    }
}

fn make_arglist(id: &str, ezq: &Value) -> Vec<String> {
    match ezq.get("process_command").and_then(Value::as_str) {
        Some(cmd_str) => {
            let expanded = cmd_str.replace("$id", id);
            if cfg!(windows) {
                vec![expanded]
            } else {
                vec!["bash".to_string(), "-c".to_string(), expanded]
            }
        }
        None => vec![String::new()],
    }
}

fn substitute_npipes_markers(full_msg_filename: &str, arglist: Vec<String>) -> Vec<String> {
    arglist
        .into_iter()
        .map(|elem| {
            let mut expanded = elem
                .replace("$msg_contents", "${escapedbodycontents}")
                .replace("$timeout", "${timeout}")
                .replace("$input_file", "${bodyfile}")
                .replace("$full_msg_file", full_msg_filename);
            for x in 0..10 {
                expanded = expanded.replace(&format!("$s3_{x}"), &format!("${{asset_{x}}}"));
            }
            expanded
        })
        .collect()
}

fn make_steps(command: Command, assets: Vec<Asset>, ezq: &Value, sqs_overflow_path: &str) -> Vec<Step> {
    let first = Step {
        id: "0".to_string(),
        command,
        assets,
        ..Default::default()
    };
    let tunneled: Vec<Step> = get_array(ezq, "npipes_next_steps")
        .iter()
        .map(Step::from_value)
        .collect();

    let result_queue_name = ezq.get("result_queue_name").and_then(Value::as_str);
    let mut steps = match result_queue_name {
        Some(name) if !name.is_empty() => vec![
            first,
            Step {
                id: "1".to_string(),
                trigger: Trigger::Sqs {
                    queue_name: name.to_string(),
                    overflow_path: sqs_overflow_path.to_string(),
                },
                protocol: Protocol::LegacyEnvelope,
                ..Default::default()
            },
        ],
        _ => vec![first],
    };
    steps.extend(tunneled);
    steps
}

fn write_full_message(path: &Path, ezq: &Value, body: &str) -> Outcome<()> {
    let doc = json!({"body": body, "preamble": ezq});
    let text = match serde_yaml::to_string(&doc) {
        Ok(s) => s,
        Err(e) => return fail!(format!("failed to render full-message YAML: {e}")),
    };
    match std::fs::write(path, text) {
        Ok(()) => Outcome::Success(()),
        Err(e) => fail!(format!("failed to write full-message file: {e}")),
    }
}

/// Renders a Message as a legacy-envelope string, for a head step whose
/// Protocol is LegacyEnvelope. Only S3-backed assets are supported, matching
/// the original's assumption that nothing else was ever tunneled through EZQ.
pub fn convert_to_legacy(message: &Message) -> Outcome<String> {
    let Some((step, other_steps)) = message.header.steps.split_first() else {
        return fail!("cannot render a Header with no Steps as a legacy envelope");
    };

    let mut directives = Map::new();
    directives.insert(
        "process_command".to_string(),
        json!(step.command.arglist.join(" ")),
    );

    let mut tunneled_steps = other_steps;
    if let Some(next) = other_steps.first() {
        if let Trigger::Sqs { queue_name, .. } = &next.trigger {
            directives.insert("result_queue_name".to_string(), json!(queue_name));
            // `next` is already captured by `result_queue_name` and gets
            // reconstructed fresh in `make_steps`; don't also tunnel it,
            // or the round trip would duplicate it.
            tunneled_steps = &other_steps[1..];
        }
    }

    let mut get_s3_files = Vec::with_capacity(step.assets.len());
    for asset in &step.assets {
        match asset_to_bucket_key(asset) {
            Outcome::Success(v) => get_s3_files.push(v),
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        }
    }
    directives.insert("get_s3_files".to_string(), Value::Array(get_s3_files));

    let body_string = match &message.body {
        Body::InAsset { asset_id } => {
            let Some(asset) = step.assets.iter().find(|a| &a.settings().id == asset_id) else {
                return fail!("body references an asset id not present among the step's assets");
            };
            match asset_to_bucket_key(asset) {
                Outcome::Success(v) => {
                    directives.insert("get_s3_file_as_body".to_string(), v);
                }
                Outcome::Failure(reason) => return Outcome::Failure(reason),
            }
            match asset {
                Asset::S3 { path, .. } => format!("Message body was diverted to S3 as {path}"),
                Asset::Uri { .. } => return fail!("legacy envelope body asset must be S3-backed"),
            }
        }
        Body::InString { string, .. } => string.clone(),
    };

    directives.insert(
        "npipes_next_steps".to_string(),
        Value::Array(tunneled_steps.iter().map(Step::min_to_value).collect()),
    );

    let preamble = json!({"EZQ": Value::Object(directives)});
    let yaml = match serde_yaml::to_string(&preamble) {
        Ok(s) => s,
        Err(e) => return fail!(format!("failed to render legacy envelope YAML: {e}")),
    };
    let yaml = yaml.strip_prefix("---\n").unwrap_or(&yaml);
    Outcome::Success(format!("---\n{yaml}...\n{body_string}"))
}

fn asset_to_bucket_key(asset: &Asset) -> Outcome<Value> {
    match asset {
        Asset::S3 { path, .. } => Outcome::Success(json!({"bucket": path.bucket, "key": path.key})),
        Asset::Uri { .. } => fail!("legacy envelope only supports S3-backed assets"),
    }
}

fn random_hex(n_bytes: usize) -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    hex[..n_bytes * 2].to_string()
}

#[cfg(test)]
#[path = "envelope_tests.rs"]
mod tests;
