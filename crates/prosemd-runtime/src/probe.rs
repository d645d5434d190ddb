//! Validity check for an installed server binary.
//!
//! Runs the candidate with a probe argument and looks only at the exit
//! status. Every way of failing to run is a verdict, never an error.

use async_trait::async_trait;
use prosemd_core::{AcquireConfig, ExecutableProbe, ProbeVerdict};
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tracing::debug;

/// Spawn attempts made while the file is still open for writing elsewhere.
const BUSY_RETRIES: u32 = 5;
const BUSY_BACKOFF: Duration = Duration::from_millis(20);

/// Probe that spawns the candidate binary.
#[derive(Debug, Clone)]
pub struct ProcessProbe {
    arg: String,
    timeout: Duration,
}

impl ProcessProbe {
    pub fn new(arg: impl Into<String>, timeout: Duration) -> Self {
        Self {
            arg: arg.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AcquireConfig) -> Self {
        Self::new(config.probe_arg.clone(), config.probe_timeout)
    }

    /// Start the candidate, retrying briefly on `ETXTBSY`.
    ///
    /// Linux refuses to exec a file that any process holds open for writing,
    /// which includes the short window after another thread forks while the
    /// file was being written.
    async fn spawn(&self, path: &Path) -> io::Result<Child> {
        let mut attempt = 0;
        loop {
            let spawned = Command::new(path)
                .arg(&self.arg)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .spawn();

            match spawned {
                Err(e) if e.kind() == io::ErrorKind::ExecutableFileBusy && attempt < BUSY_RETRIES => {
                    attempt += 1;
                    debug!("{} is busy, retrying spawn ({attempt}/{BUSY_RETRIES})", path.display());
                    tokio::time::sleep(BUSY_BACKOFF * attempt).await;
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl ExecutableProbe for ProcessProbe {
    async fn probe(&self, path: &Path) -> ProbeVerdict {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return ProbeVerdict::Missing,
            Err(e) => return ProbeVerdict::SpawnFailed(e.to_string()),
        };

        if !metadata.is_file() {
            return ProbeVerdict::NotAFile;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o111 == 0 {
                return ProbeVerdict::NotExecutable;
            }
        }

        let mut child = match self.spawn(path).await {
            Ok(child) => child,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return ProbeVerdict::NotExecutable;
            }
            Err(e) => return ProbeVerdict::SpawnFailed(e.to_string()),
        };

        let waited = tokio::time::timeout(self.timeout, child.wait()).await;
        match waited {
            Ok(Ok(status)) if status.success() => ProbeVerdict::Valid,
            Ok(Ok(status)) => ProbeVerdict::ExitedWith(status.code()),
            Ok(Err(e)) => ProbeVerdict::SpawnFailed(e.to_string()),
            Err(_) => {
                if let Err(e) = child.kill().await {
                    debug!("Failed to kill timed-out probe {}: {}", path.display(), e);
                }
                ProbeVerdict::TimedOut(self.timeout)
            }
        }
    }
}
