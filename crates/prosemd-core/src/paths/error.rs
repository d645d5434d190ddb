//! Storage root discovery errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating the default storage root.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// An empty path was provided through the environment.
    #[error("Path cannot be empty")]
    EmptyPath,

    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),
}
