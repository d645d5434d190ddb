//! `run`: install the server if needed, then hand the terminal to it.

use anyhow::{Context, Result};
use prosemd_runtime::CancellationToken;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

use crate::bootstrap::CliContext;
use crate::error::EXIT_CANCELLED;
use crate::handlers::ensure;

/// Arguments used when none are given on the command line.
pub const DEFAULT_SERVER_ARGS: &[&str] = &["--stdio"];

/// Build the server command with inherited stdio.
pub fn server_command(path: &Path, args: &[String]) -> Command {
    let mut cmd = Command::new(path);
    if args.is_empty() {
        cmd.args(DEFAULT_SERVER_ARGS);
    } else {
        cmd.args(args);
    }
    cmd.env("RUST_LOG", "warn")
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);
    cmd
}

pub async fn execute(ctx: &CliContext, args: &[String], cancel: &CancellationToken) -> Result<i32> {
    let Some(path) = ensure::acquire(ctx, cancel).await? else {
        eprintln!("Server download cancelled");
        return Ok(EXIT_CANCELLED);
    };

    debug!("Launching {} {:?}", path.display(), args);
    let mut child = server_command(&path, args)
        .spawn()
        .with_context(|| format!("Failed to start {}", path.display()))?;

    tokio::select! {
        status = child.wait() => {
            let status = status.context("Failed to wait for the server process")?;
            Ok(status_code(status))
        }
        () = cancel.cancelled() => {
            child.kill().await.ok();
            Ok(EXIT_CANCELLED)
        }
    }
}

/// Exit code to report for the finished server.
///
/// A child killed by a signal maps to `128 + signal` like a shell does.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
