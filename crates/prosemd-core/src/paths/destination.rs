//! Install location and release URL construction.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AcquireError, AcquireResult};
use crate::platform::PlatformInfo;
use crate::tag::VersionTag;

/// Subdirectory of the storage root that holds server binaries.
pub const SERVER_DIR: &str = "server";

/// Directory holding every installed server version.
///
/// Path: `{root}/server/`
pub fn server_dir(storage_root: &Path) -> PathBuf {
    storage_root.join(SERVER_DIR)
}

/// Compute where the server for `tag` is installed, creating its directory.
///
/// Path: `{root}/server/{artifact}-{tag}{extension}`
///
/// Directory creation is idempotent, so this is safe to call on every run.
pub fn server_destination(
    storage_root: &Path,
    artifact_name: &str,
    tag: &VersionTag,
    extension: &str,
) -> AcquireResult<PathBuf> {
    let dir = server_dir(storage_root);
    fs::create_dir_all(&dir).map_err(|e| AcquireError::io("create directory", &dir, e))?;

    Ok(dir.join(format!("{artifact_name}-{tag}{extension}")))
}

/// Build the release asset URL for `tag` on the given platform.
///
/// URL: `{base}/{tag}/{artifact}-{variant}{extension}`
pub fn artifact_url(
    base_url: &str,
    artifact_name: &str,
    tag: &VersionTag,
    platform: &PlatformInfo,
) -> String {
    format!(
        "{}/{tag}/{artifact_name}-{}{}",
        base_url.trim_end_matches('/'),
        platform.variant,
        platform.file_extension
    )
}
