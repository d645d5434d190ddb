//! Error types for server acquisition.
//!
//! Cancellation is deliberately absent from this taxonomy: a cancelled
//! download is reported as an outcome value, not as a failure.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while moving bytes from the release store to the local disk.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The release store answered with a non-2xx status.
    #[error("Download failed with status {status}: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The connection could not be established or was reset.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response body could not be read to completion.
    #[error("Error reading download stream: {0}")]
    Body(String),

    /// No progress was made within the configured bound.
    #[error("Download stalled for {0:?}")]
    Timeout(Duration),
}

/// Errors that can occur while ensuring a server binary is installed.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// No release variant is published for this operating system.
    #[error("Unsupported platform: no prosemd-lsp build is published for '{os}'")]
    UnsupportedPlatform {
        /// The host OS identifier that had no mapping
        os: String,
    },

    /// The version tag cannot be embedded in a path or URL.
    #[error("Invalid version tag '{tag}': {reason}")]
    InvalidTag {
        /// The rejected tag
        tag: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A filesystem operation failed (directory creation, write, rename).
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted, including the path involved
        context: String,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The download could not be completed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The acquisition settings cannot be used.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AcquireError {
    /// Create an `Io` error describing an operation on `path`.
    pub fn io(action: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            context: format!("Failed to {action} {}", path.into().display()),
            source,
        }
    }

    /// True for filesystem failures.
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// True for network and release-store failures, including timeouts.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Result type alias for acquisition operations
pub type AcquireResult<T> = Result<T, AcquireError>;
