// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process Runner: launches a Step's argv, optionally piping the body to
//! stdin, and enforces the step's wall-clock timeout.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::Duration;

use npipes_core::{fail, NpipesError, Outcome};

/// Runs `arglist` to completion.
///
/// `stdin` is written to the child's stdin and the handle closed before
/// waiting, iff present. `timeout_secs == 0` means no timeout; otherwise the
/// child is killed once elapsed wall time reaches `timeout_secs` and the
/// call fails with exactly `"Command timed out"`.
///
/// A non-zero exit is a `Failure` carrying [`NpipesError::Command`]; a zero
/// exit is `Success` with stdout decoded as UTF-8 (lossily, so arbitrary
/// child output can never crash the engine).
pub async fn run_command(arglist: &[String], stdin: Option<&[u8]>, timeout_secs: u64) -> Outcome<String> {
    let Some((program, args)) = arglist.split_first() else {
        return fail!("cannot run an empty arglist");
    };

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() });
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    // Ensure the timeout branch below actually kills the child instead of
    // leaking it once the future is dropped.
    cmd.kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return fail!(format!("failed to launch {program}: {e}")),
    };

    if let Some(bytes) = stdin {
        if let Some(mut pipe) = child.stdin.take() {
            if let Err(e) = pipe.write_all(bytes).await {
                return fail!(format!("failed writing stdin to {program}: {e}"));
            }
        }
    }

    let wait = child.wait_with_output();
    let output = if timeout_secs == 0 {
        match wait.await {
            Ok(output) => output,
            Err(e) => return fail!(format!("{program} failed: {e}")),
        }
    } else {
        match tokio::time::timeout(Duration::from_secs(timeout_secs), wait).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return fail!(format!("{program} failed: {e}")),
            Err(_elapsed) => return fail!("Command timed out"),
        }
    };

    if output.status.success() {
        Outcome::Success(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let err = NpipesError::Command {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        fail!(err.to_string())
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
