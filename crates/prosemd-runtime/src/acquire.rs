//! Acquisition facade: return a path to a ready-to-run server binary.
//!
//! ```text
//! destination ──► probe ──valid──► Cached(path)
//!                   │
//!                 invalid
//!                   ▼
//!      platform + URL ──► download ──► Downloaded(path) | Cancelled | Err
//! ```
//!
//! At most one download is attempted per call and nothing is retried. A
//! fresh download is not probed again; the next call will.

use prosemd_core::{
    AcquireConfig, AcquireError, AcquireResult, ArtifactTransport, ExecutableProbe, HostOs, Logger,
    NoopProgress, PlatformInfo, ProbeVerdict, ProgressEvent, ProgressSink, VersionTag,
    artifact_url, resolve_platform, server_destination,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::download::{DownloadOutcome, Downloader};
use crate::http::ReqwestTransport;
use crate::probe::ProcessProbe;

/// Result of a successful or cancelled acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// A valid binary was already installed; no network access happened.
    Cached(PathBuf),
    /// The binary was downloaded and installed by this call.
    Downloaded(PathBuf),
    /// The caller cancelled the download. Any previous file is untouched.
    Cancelled,
}

impl Acquisition {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Cached(path) | Self::Downloaded(path) => Some(path),
            Self::Cancelled => None,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Self::Cached(path) | Self::Downloaded(path) => Some(path),
            Self::Cancelled => None,
        }
    }

    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Production acquirer wiring.
pub type DefaultServerAcquirer = ServerAcquirer<ReqwestTransport, ProcessProbe>;

/// Ensures the server binary for a tag is installed under a storage root.
pub struct ServerAcquirer<T, P> {
    config: AcquireConfig,
    host_os: Option<HostOs>,
    downloader: Downloader<T>,
    probe: P,
    logger: Arc<dyn Logger>,
}

impl ServerAcquirer<ReqwestTransport, ProcessProbe> {
    /// Wire the reqwest transport and process probe from `config`.
    pub fn with_defaults(config: AcquireConfig, logger: Arc<dyn Logger>) -> AcquireResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        let probe = ProcessProbe::from_config(&config);
        Ok(Self::new(config, transport, probe, logger))
    }
}

impl<T: ArtifactTransport, P: ExecutableProbe> ServerAcquirer<T, P> {
    pub fn new(config: AcquireConfig, transport: T, probe: P, logger: Arc<dyn Logger>) -> Self {
        let downloader = Downloader::new(transport, config.stall_timeout);
        Self {
            config,
            host_os: HostOs::current(),
            downloader,
            probe,
            logger,
        }
    }

    /// Resolve paths and URLs for `os` instead of the compile-time host.
    #[must_use]
    pub const fn with_host_os(mut self, os: HostOs) -> Self {
        self.host_os = Some(os);
        self
    }

    pub const fn config(&self) -> &AcquireConfig {
        &self.config
    }

    pub const fn transport(&self) -> &T {
        self.downloader.transport()
    }

    /// Local install path for `tag`, creating its directory.
    pub fn destination(&self, storage_root: &Path, tag: &VersionTag) -> AcquireResult<PathBuf> {
        let extension = self.host_os.map_or("", HostOs::executable_extension);
        server_destination(storage_root, &self.config.artifact_name, tag, extension)
    }

    /// Remote asset URL for `tag` on this host.
    pub fn url(&self, tag: &VersionTag) -> AcquireResult<String> {
        let platform = self.platform()?;
        Ok(artifact_url(
            &self.config.release_base_url,
            &self.config.artifact_name,
            tag,
            &platform,
        ))
    }

    fn platform(&self) -> AcquireResult<PlatformInfo> {
        let os = self.host_os.ok_or_else(|| AcquireError::UnsupportedPlatform {
            os: std::env::consts::OS.to_string(),
        })?;
        resolve_platform(os)
    }

    /// Return a path to a working server binary, downloading it if needed.
    ///
    /// Failures are returned exactly as the download produced them.
    pub async fn ensure(
        &self,
        storage_root: &Path,
        tag: &VersionTag,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> AcquireResult<Acquisition> {
        let dest = self.destination(storage_root, tag)?;

        let verdict = self.probe.probe(&dest).await;
        if verdict.is_valid() {
            self.logger
                .info(&format!("Using installed server: {}", dest.display()));
            return Ok(Acquisition::Cached(dest));
        }
        if verdict != ProbeVerdict::Missing {
            self.logger.warn(&format!(
                "Installed server at {} is unusable ({verdict}); downloading a fresh copy",
                dest.display()
            ));
        }

        let url = self.url(tag)?;
        self.logger.info(&format!("Server URL: {url}"));
        progress.report(&ProgressEvent::new(
            format!("Downloading {} server", self.config.artifact_name),
            0.0,
        ));

        match self.downloader.download(&url, &dest, progress, cancel).await {
            Ok(DownloadOutcome::Completed { bytes }) => {
                self.logger.info(&format!(
                    "Installed {bytes} bytes to {}",
                    dest.display()
                ));
                Ok(Acquisition::Downloaded(dest))
            }
            Ok(DownloadOutcome::Cancelled) => {
                self.logger.warn("Server download cancelled");
                Ok(Acquisition::Cancelled)
            }
            Err(e) => {
                self.logger
                    .error(&format!("Failed to download server from {url}: {e}"));
                Err(e)
            }
        }
    }

    /// [`ensure`](Self::ensure) without progress reporting or cancellation.
    pub async fn ensure_default(
        &self,
        storage_root: &Path,
        tag: &VersionTag,
    ) -> AcquireResult<Acquisition> {
        self.ensure(storage_root, tag, &NoopProgress, &CancellationToken::new())
            .await
    }
}
