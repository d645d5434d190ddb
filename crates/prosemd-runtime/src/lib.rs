//! Runtime adapters for acquiring the prosemd-lsp server.
//!
//! - `http`: reqwest transport for the release store
//! - `probe`: spawns a candidate binary to check it runs
//! - `download`: streams into a temp file and installs by atomic rename
//! - `acquire`: the `ServerAcquirer` facade tying the above together
//! - `logging`: `Logger` adapters (tracing, line-oriented writer)
//!
//! # Example
//!
//! ```rust,ignore
//! use prosemd_core::{AcquireConfig, VersionTag};
//! use prosemd_runtime::{ServerAcquirer, TracingLogger};
//! use std::sync::Arc;
//!
//! let acquirer = ServerAcquirer::with_defaults(AcquireConfig::new(), Arc::new(TracingLogger))?;
//! let tag = VersionTag::new("v0.1.0")?;
//! if let Some(path) = acquirer.ensure_default(&storage_root, &tag).await?.into_path() {
//!     println!("server ready at {}", path.display());
//! }
//! ```

pub mod acquire;
pub mod download;
pub mod http;
pub mod logging;
pub mod probe;

pub use acquire::{Acquisition, DefaultServerAcquirer, ServerAcquirer};
pub use download::{DownloadOutcome, Downloader, ProgressTracker, TEMP_PREFIX};
pub use http::ReqwestTransport;
pub use logging::{FanoutLogger, LineLogger, TracingLogger};
pub use probe::ProcessProbe;

// Cancellation token type accepted by `ServerAcquirer::ensure`
pub use tokio_util::sync::CancellationToken;
