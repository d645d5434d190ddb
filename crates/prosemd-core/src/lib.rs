//! Core domain types and port definitions for acquiring the prosemd-lsp server.
//!
//! This crate knows *what* a valid installation looks like and *where* it
//! lives, and defines the traits through which adapters fetch bytes, probe
//! binaries and report progress. It performs no network access and
//! spawns no processes.

pub mod config;
pub mod error;
pub mod paths;
pub mod platform;
pub mod ports;
pub mod tag;

// Re-export commonly used types for convenience
pub use config::{
    AcquireConfig, ConfigError, DEFAULT_ARTIFACT_NAME, DEFAULT_PROBE_ARG, DEFAULT_RELEASE_BASE_URL,
};
pub use error::{AcquireError, AcquireResult, TransportError};
pub use platform::{HostOs, PlatformInfo, PlatformParseError, Variant, resolve_platform};
pub use ports::{
    ArtifactBody, ArtifactTransport, ChunkStream, ExecutableProbe, Logger, NoopLogger,
    NoopProgress, ProbeVerdict, ProgressEvent, ProgressSink,
};
pub use tag::VersionTag;

// Re-export path utilities
pub use paths::{
    DATA_DIR_ENV, PathError, SERVER_DIR, artifact_url, default_storage_root, server_destination,
    server_dir,
};

#[cfg(any(test, feature = "test-utils"))]
pub use ports::{MockArtifactTransport, MockExecutableProbe};
