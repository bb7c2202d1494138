// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrent download, decompress, and rename of a Step's Assets.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use md5::{Digest, Md5};
use npipes_adapters::{BlobStore, HttpClient};
use npipes_core::{fail, Asset, Outcome};

use crate::decompress::decompress;

/// Generates a random 16-hex-character name, matching
/// `secrets.token_hex(8)` in the original.
pub(crate) fn random_name() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..16].to_string()
}

fn unique_asset_name(asset: &Asset) -> String {
    format!("{}.{}", random_name(), asset.raw_extension())
}

fn file_md5(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    let mut hasher = Md5::new();
    hasher.update(&bytes);
    Some(hasher.finalize().iter().map(|b| format!("{b:02x}")).collect())
}

/// Whether `local_path` already holds the current version of the remote
/// object, per its ETag. A mismatch (or a missing local file) means "not
/// current" rather than an error.
fn is_current(local_path: &Path, remote_etag: Option<&str>) -> bool {
    match (file_md5(local_path), remote_etag) {
        (Some(md5), Some(etag)) => md5 == etag.trim_matches('"'),
        _ => false,
    }
}

/// Fetches, decompresses, and renames every asset in `assets`, in parallel.
/// On any failure, every sibling that succeeded is unlinked before a single
/// aggregate `Failure` is returned; the result order always matches the
/// input order.
pub async fn localize_assets(
    assets: &[Asset],
    blobs: Arc<dyn BlobStore>,
    http: Arc<dyn HttpClient>,
    workdir: &Path,
) -> Outcome<Vec<PathBuf>> {
    let mut set = tokio::task::JoinSet::new();
    for (idx, asset) in assets.iter().cloned().enumerate() {
        let workdir = workdir.to_path_buf();
        let blobs = Arc::clone(&blobs);
        let http = Arc::clone(&http);
        set.spawn(async move { (idx, localize_asset(&asset, blobs.as_ref(), http.as_ref(), &workdir).await) });
    }

    let mut results: Vec<Option<Outcome<PathBuf>>> = (0..assets.len()).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, outcome)) => results[idx] = Some(outcome),
            Err(e) => return fail!(format!("asset localization task panicked: {e}")),
        }
    }

    let outcomes: Vec<Outcome<PathBuf>> = results.into_iter().map(|o| o.expect("every index filled")).collect();
    if outcomes.iter().any(Outcome::is_failure) {
        for outcome in &outcomes {
            if let Outcome::Success(path) = outcome {
                let _ = fs::remove_file(path);
            }
        }
        return fail!("unable to localize one or more assets");
    }

    Outcome::Success(
        outcomes
            .into_iter()
            .map(|o| o.into_success().expect("checked above"))
            .collect(),
    )
}

async fn localize_asset(
    asset: &Asset,
    blobs: &dyn BlobStore,
    http: &dyn HttpClient,
    workdir: &Path,
) -> Outcome<PathBuf> {
    let tempname = workdir.join(unique_asset_name(asset));
    let downloaded = match download(asset, &tempname, blobs, http).await {
        Outcome::Success(p) => p,
        Outcome::Failure(reason) => return Outcome::Failure(reason),
    };
    let decompressed = if asset.settings().decompression.decompress {
        match decompress(downloaded).await {
            Outcome::Success(p) => p,
            Outcome::Failure(reason) => return Outcome::Failure(reason),
        }
    } else {
        downloaded
    };
    rename_to_local_target(decompressed, asset, workdir)
}

async fn download(asset: &Asset, tempname: &Path, blobs: &dyn BlobStore, http: &dyn HttpClient) -> Outcome<PathBuf> {
    match asset {
        Asset::S3 { path, .. } => {
            let etag = match blobs.get_etag(path).await {
                Outcome::Success(etag) => etag,
                Outcome::Failure(reason) => return Outcome::Failure(reason),
            };
            if is_current(tempname, etag.as_deref()) {
                return Outcome::Success(tempname.to_path_buf());
            }
            let bytes = match blobs.get_object(path).await {
                Outcome::Success(bytes) => bytes,
                Outcome::Failure(reason) => return Outcome::Failure(reason),
            };
            match fs::write(tempname, bytes) {
                Ok(()) => Outcome::Success(tempname.to_path_buf()),
                Err(e) => fail!(format!("unable to write downloaded asset {}: {e}", tempname.display())),
            }
        }
        Asset::Uri { uri, .. } => match http.get_bytes(uri).await {
            Outcome::Success(bytes) => match fs::write(tempname, bytes) {
                Ok(()) => Outcome::Success(tempname.to_path_buf()),
                Err(e) => fail!(format!("unable to write downloaded asset {}: {e}", tempname.display())),
            },
            Outcome::Failure(reason) => Outcome::Failure(reason),
        },
    }
}

/// `workdir`-relative so concurrent localizations across different
/// messages never collide on the same relative local target, mirroring
/// the original's assumption that each message runs in its own working
/// directory.
fn rename_to_local_target(fname: PathBuf, asset: &Asset, workdir: &Path) -> Outcome<PathBuf> {
    let target = workdir.join(asset.decide_local_target());
    if let Some(parent) = target.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            return fail!(format!("unable to create parent dirs for {}: {e}", target.display()));
        }
    }
    let target_is_dir_marker = target.file_name().is_none();
    if target_is_dir_marker {
        if !fname.is_dir() {
            return fail!(format!("unable to rename a file to {}", target.display()));
        }
        if let Err(e) = copy_dir_recursive(&fname, &target) {
            return fail!(format!("unable to copy directory asset into {}: {e}", target.display()));
        }
        if let Err(e) = fs::remove_dir_all(&fname) {
            return fail!(format!("unable to remove source directory {} after copy: {e}", fname.display()));
        }
        return Outcome::Success(target);
    }
    match fs::rename(&fname, &target) {
        Ok(()) => Outcome::Success(target),
        Err(_) => match fs::copy(&fname, &target) {
            Ok(_) => {
                let _ = fs::remove_file(&fname);
                Outcome::Success(target)
            }
            Err(e) => fail!(format!("error renaming to local target {}: {e}", target.display())),
        },
    }
}

/// Recursively copies `src`'s contents into `dst`, creating directories as
/// needed. Used for the `localTarget == "."` case, where the source is a
/// whole decompressed directory rather than a single file.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target_path = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target_path)?;
        } else {
            fs::copy(entry.path(), &target_path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "localize_tests.rs"]
mod tests;
