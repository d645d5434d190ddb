//! Executable probe port.
//!
//! A probe answers one question: does the file at a path run and exit
//! cleanly? "No" is an ordinary answer, never an error, because a broken
//! binary is exactly what triggers a fresh download.

use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Result of probing a candidate binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeVerdict {
    /// Started and exited with status 0.
    Valid,
    /// Nothing exists at the path.
    Missing,
    /// The path exists but is not a regular file.
    NotAFile,
    /// The file has no execute permission.
    NotExecutable,
    /// The process ran but exited non-zero (`None` when killed by a signal).
    ExitedWith(Option<i32>),
    /// The process could not be started (wrong architecture, corrupt image...).
    SpawnFailed(String),
    /// The process did not exit within the probe timeout and was killed.
    TimedOut(Duration),
}

impl ProbeVerdict {
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for ProbeVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("valid"),
            Self::Missing => f.write_str("missing"),
            Self::NotAFile => f.write_str("not a regular file"),
            Self::NotExecutable => f.write_str("not executable"),
            Self::ExitedWith(Some(code)) => write!(f, "exited with status {code}"),
            Self::ExitedWith(None) => f.write_str("terminated by signal"),
            Self::SpawnFailed(reason) => write!(f, "failed to start: {reason}"),
            Self::TimedOut(after) => write!(f, "did not exit within {after:?}"),
        }
    }
}

/// Checks whether a file is a working copy of the server.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ExecutableProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> ProbeVerdict;
}
