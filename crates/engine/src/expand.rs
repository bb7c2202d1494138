// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Substitutes `${name}` tokens throughout a Step's Command before it runs.

use std::collections::HashMap;
use std::path::Path;

use npipes_core::{Asset, Command, OutputChannel};

/// Inputs available for token substitution: the fixed token set plus one
/// entry per asset, keyed by its `settings.id`.
pub struct ExpandContext<'a> {
    pub bodyfile: &'a Path,
    pub headerfile: &'a Path,
    pub outputfile: &'a Path,
    pub pid: u32,
    pub body: &'a str,
    /// `asset.settings.id` -> its localized path.
    pub asset_targets: &'a HashMap<String, String>,
}

/// Expands every `${name}` token in `command`'s arglist (and, for a File
/// output channel, its filepath) against `ctx`. Unknown tokens are left
/// untouched. `${escapedbodycontents}` is computed only if some arg
/// actually references it, since the body may be large.
pub fn expand_command(command: &Command, ctx: &ExpandContext<'_>) -> Command {
    let mut vars: HashMap<String, String> = ctx.asset_targets.clone();
    vars.insert("bodyfile".to_string(), ctx.bodyfile.display().to_string());
    vars.insert("headerfile".to_string(), ctx.headerfile.display().to_string());
    vars.insert("outputfile".to_string(), ctx.outputfile.display().to_string());
    vars.insert("pid".to_string(), ctx.pid.to_string());
    vars.insert("bodycontents".to_string(), ctx.body.to_string());

    let mut newargs: Vec<String> = command.arglist.iter().map(|s| substitute(s, &vars)).collect();

    if newargs.iter().any(|arg| arg.contains("${escapedbodycontents}")) {
        let mut escaped_vars = HashMap::new();
        escaped_vars.insert("escapedbodycontents".to_string(), shell_single_quote(ctx.body));
        newargs = newargs.iter().map(|s| substitute(s, &escaped_vars)).collect();
    }

    let output_channel = match &command.output_channel {
        OutputChannel::File { filepath } => {
            let mut bodyfile_only = HashMap::new();
            bodyfile_only.insert("bodyfile".to_string(), ctx.bodyfile.display().to_string());
            OutputChannel::File {
                filepath: substitute(filepath, &bodyfile_only),
            }
        }
        OutputChannel::Stdout => OutputChannel::Stdout,
    };

    Command {
        arglist: newargs,
        timeout: command.timeout,
        input_channel_stdin: command.input_channel_stdin,
        output_channel,
    }
}

/// Builds the `asset_targets` map an [`ExpandContext`] needs from a Step's
/// assets and their localized paths, zipped by position (the order
/// `npipes-assets::localize_assets` returns matches the input order).
pub fn asset_targets(assets: &[Asset], localized: &[impl AsRef<Path>]) -> HashMap<String, String> {
    assets
        .iter()
        .zip(localized.iter())
        .map(|(asset, path)| (asset.settings().id.clone(), path.as_ref().display().to_string()))
        .collect()
}

/// Replaces every well-formed `${identifier}` token found in `vars`;
/// anything else (unknown identifiers, malformed `${`) is left as-is,
/// matching `string.Template.safe_substitute`'s unknown-token behavior.
fn substitute(template: &str, vars: &HashMap<String, String>) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '$' && i + 1 < chars.len() && chars[i + 1] == '{' {
            if let Some(close) = chars[i + 2..].iter().position(|&c| c == '}') {
                let name: String = chars[i + 2..i + 2 + close].iter().collect();
                let is_identifier = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
                if is_identifier {
                    match vars.get(&name) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("${");
                            out.push_str(&name);
                            out.push('}');
                        }
                    }
                    i += 2 + close + 1;
                    continue;
                }
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// POSIX single-quote escaping: wraps `s` in single quotes, replacing any
/// embedded `'` with `'\''`.
fn shell_single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod tests;
