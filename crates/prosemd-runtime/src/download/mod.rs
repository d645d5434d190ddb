//! Streaming download with atomic install.
//!
//! The destination path is only ever written by a single `rename` of a fully
//! written, flushed temporary file from the same directory. A failed or
//! cancelled attempt leaves the destination exactly as it was and removes its
//! own temporary file.

mod progress;

use futures_util::StreamExt;
use prosemd_core::{
    AcquireError, AcquireResult, ArtifactTransport, ProgressSink, TransportError,
};
use std::io;
use std::path::Path;
use std::time::Duration;
use tempfile::{NamedTempFile, TempPath};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use progress::ProgressTracker;

/// Prefix shared by all in-flight download files.
pub const TEMP_PREFIX: &str = ".tmp";

/// How a download attempt ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The destination now holds the complete artifact.
    Completed { bytes: u64 },
    /// The caller cancelled; the destination was not touched.
    Cancelled,
}

/// Fetches an artifact and installs it atomically.
pub struct Downloader<T> {
    transport: T,
    stall_timeout: Duration,
}

impl<T: ArtifactTransport> Downloader<T> {
    pub const fn new(transport: T, stall_timeout: Duration) -> Self {
        Self {
            transport,
            stall_timeout,
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Download `url` into `dest`.
    ///
    /// Waiting for the response and waiting for each chunk are both bounded
    /// by the stall timeout.
    ///
    /// # Cancellation
    ///
    /// `cancel` is checked before the request and between every chunk, so a
    /// cancellation takes effect within one IO step. The response stream is
    /// dropped, which closes the connection, and `DownloadOutcome::Cancelled`
    /// is returned.
    pub async fn download(
        &self,
        url: &str,
        dest: &Path,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> AcquireResult<DownloadOutcome> {
        let dir = dest.parent().ok_or_else(|| {
            AcquireError::io(
                "resolve the directory of",
                dest,
                io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"),
            )
        })?;

        if cancel.is_cancelled() {
            return Ok(DownloadOutcome::Cancelled);
        }
        let body = tokio::select! {
            biased;

            () = cancel.cancelled() => return Ok(DownloadOutcome::Cancelled),
            result = tokio::time::timeout(self.stall_timeout, self.transport.fetch(url)) => {
                result.map_err(|_| TransportError::Timeout(self.stall_timeout))??
            }
        };
        let expected = body.content_length;
        debug!("Content-Length: {:?}", expected);

        let (file, temp_path) = create_temp_file(dir)?.into_parts();
        debug!("Downloading to temporary path: {}", temp_path.display());
        let mut file = tokio::fs::File::from_std(file);

        let mut chunks = body.chunks;
        let mut tracker = ProgressTracker::new(expected);
        let mut downloaded: u64 = 0;

        loop {
            let next = tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    debug!("Download cancelled after {} bytes", downloaded);
                    return Ok(DownloadOutcome::Cancelled);
                }
                next = tokio::time::timeout(self.stall_timeout, chunks.next()) => next,
            };

            let chunk = match next {
                Err(_) => return Err(TransportError::Timeout(self.stall_timeout).into()),
                Ok(None) => break,
                Ok(Some(chunk)) => chunk?,
            };

            file.write_all(&chunk)
                .await
                .map_err(|e| AcquireError::io("write to", &*temp_path, e))?;
            downloaded += chunk.len() as u64;

            if let Some(event) = tracker.advance(downloaded) {
                progress.report(&event);
            }
        }

        if let Some(total) = expected {
            if downloaded != total {
                return Err(TransportError::Body(format!(
                    "expected {total} bytes, received {downloaded}"
                ))
                .into());
            }
        }

        file.flush()
            .await
            .map_err(|e| AcquireError::io("flush", &*temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| AcquireError::io("sync", &*temp_path, e))?;
        drop(file.into_std().await);

        if let Some(event) = tracker.finish(downloaded) {
            progress.report(&event);
        }

        commit(temp_path, dest)?;
        debug!("Moved download to final location: {}", dest.display());

        Ok(DownloadOutcome::Completed { bytes: downloaded })
    }
}

/// Create an owner-executable temporary file next to the destination.
///
/// The file is removed when the returned handle is dropped unless it is
/// committed first.
fn create_temp_file(dir: &Path) -> AcquireResult<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_PREFIX).rand_bytes(10);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o755));
    }

    builder
        .tempfile_in(dir)
        .map_err(|e| AcquireError::io("create temporary file in", dir, e))
}

/// Rename the finished temporary file onto the destination.
fn commit(temp_path: TempPath, dest: &Path) -> AcquireResult<()> {
    temp_path
        .persist(dest)
        .map_err(|e| AcquireError::io("move download to", dest, e.error))
}
