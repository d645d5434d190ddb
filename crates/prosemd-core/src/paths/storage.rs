//! Default storage root resolution.

use std::env;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable that overrides the storage root.
pub const DATA_DIR_ENV: &str = "PROSEMD_DATA_DIR";

/// Get the default root under which downloaded servers are kept.
///
/// Resolution order:
/// 1. `PROSEMD_DATA_DIR` environment variable (highest priority)
/// 2. System data directory (e.g., `~/.local/share/prosemd`)
///
/// The directory is not created here; the destination resolver creates what
/// it needs below the root.
pub fn default_storage_root() -> Result<PathBuf, PathError> {
    if let Ok(raw) = env::var(DATA_DIR_ENV) {
        return from_override(&raw);
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join("prosemd"))
}

fn from_override(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let path = PathBuf::from(trimmed);
    if path.exists() && !path.is_dir() {
        return Err(PathError::NotADirectory(path));
    }
    Ok(path)
}
