//! Path utilities for the installed server binary.
//!
//! - Local install location under a caller-owned storage root
//! - Remote release asset URL
//! - Default storage root discovery
//!
//! # Design
//!
//! - Returns `PathBuf` and typed errors for clear error handling
//! - Resolution is deterministic: the same inputs always produce the same path,
//!   which is what lets a previous run's download be reused

mod destination;
mod error;
mod storage;

pub use destination::{SERVER_DIR, artifact_url, server_destination, server_dir};
pub use error::PathError;
pub use storage::{DATA_DIR_ENV, default_storage_root};
