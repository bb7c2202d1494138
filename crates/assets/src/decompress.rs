// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decompressor dispatch by file extension.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use npipes_core::{fail, Outcome};

/// Picks a decompressor by `path`'s final extension and runs it, returning
/// the path of the decompressed result.
pub async fn decompress(path: PathBuf) -> Outcome<PathBuf> {
    let suffix = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_string();
    let result = match suffix.as_str() {
        "zip" => tokio::task::spawn_blocking(move || decompress_zip(&path)).await,
        "gz" => tokio::task::spawn_blocking(move || decompress_gzip(&path)).await,
        other => return fail!(format!("unable to determine decompressor from file extension {other}")),
    };
    match result {
        Ok(Outcome::Success(p)) => Outcome::Success(p),
        Ok(Outcome::Failure(reason)) => Outcome::Failure(reason),
        Err(e) => fail!(format!("decompression task panicked: {e}")),
    }
}

/// Extracts a zip archive into a freshly generated sibling directory,
/// removing the archive on success. On failure, removes the partial
/// directory and the archive.
fn decompress_zip(file: &Path) -> Outcome<PathBuf> {
    let tmpdir = sibling_random_dir(file);
    match extract_zip(file, &tmpdir) {
        Ok(()) => {
            let _ = fs::remove_file(file);
            Outcome::Success(tmpdir)
        }
        Err(e) => {
            let _ = fs::remove_dir_all(&tmpdir);
            let _ = fs::remove_file(file);
            fail!(format!("decompression error: {e}"))
        }
    }
}

fn extract_zip(file: &Path, tmpdir: &Path) -> io::Result<()> {
    let f = fs::File::open(file)?;
    let mut archive =
        zip::ZipArchive::new(f).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    archive
        .extract(tmpdir)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

fn sibling_random_dir(file: &Path) -> PathBuf {
    let parent = file.parent().unwrap_or_else(|| Path::new("."));
    parent.join(crate::localize::random_name())
}

/// Streams a `.gz` (or `.tgz`) file to its stem path. Only decompresses;
/// never explodes a `.tar.gz`/`.tgz` archive's contained tar.
fn decompress_gzip(file: &Path) -> Outcome<PathBuf> {
    let is_tgz = file.extension().and_then(|s| s.to_str()) == Some("tgz");
    let mut target = file.with_extension("");
    if is_tgz {
        target.set_extension("tar");
    }
    match gunzip(file, &target) {
        Ok(()) => Outcome::Success(target),
        Err(e) => fail!(format!("decompressGzip failed with {e}")),
    }
}

fn gunzip(src_path: &Path, dst_path: &Path) -> io::Result<()> {
    let src = fs::File::open(src_path)?;
    let mut decoder = flate2::read::GzDecoder::new(src);
    let mut dst = fs::File::create(dst_path)?;
    io::copy(&mut decoder, &mut dst)?;
    Ok(())
}

#[cfg(test)]
#[path = "decompress_tests.rs"]
mod tests;
