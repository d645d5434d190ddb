//! Exit codes for failed commands.
//!
//! Codes follow sysexits.h where a category fits:
//! - 64: invalid version tag (EX_USAGE)
//! - 69: no server build for this platform (EX_UNAVAILABLE)
//! - 74: filesystem failure (EX_IOERR)
//! - 75: network or release-store failure, worth retrying (EX_TEMPFAIL)
//! - 78: unusable configuration (EX_CONFIG)
//! - 130: cancelled with Ctrl-C

use prosemd_core::{AcquireError, PathError};

/// Exit code after a Ctrl-C cancellation.
pub const EXIT_CANCELLED: i32 = 130;

/// Map a command failure to a process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<AcquireError>() {
        return match err {
            AcquireError::InvalidTag { .. } => 64,
            AcquireError::UnsupportedPlatform { .. } => 69,
            AcquireError::Io { .. } => 74,
            AcquireError::Transport(_) => 75,
            AcquireError::Config(_) => 78,
        };
    }
    if err.downcast_ref::<PathError>().is_some() {
        return 78;
    }
    1
}
