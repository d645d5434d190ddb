//! Acquisition configuration.
//!
//! Deployment constants (release store location, artifact name) and the
//! timeouts applied to the probe and the download.

use std::time::Duration;
use url::Url;

/// Release store the server binaries are published to.
pub const DEFAULT_RELEASE_BASE_URL: &str = "https://github.com/kitten/prosemd-lsp/releases/download";

/// Base name shared by the remote asset and the local file.
pub const DEFAULT_ARTIFACT_NAME: &str = "prosemd-lsp";

/// Argument that makes the server print its version and exit.
pub const DEFAULT_PROBE_ARG: &str = "--version";

/// Configuration for acquiring the server binary.
///
/// # Example
///
/// ```
/// use prosemd_core::AcquireConfig;
/// use std::time::Duration;
///
/// let config = AcquireConfig::new()
///     .with_probe_timeout(Duration::from_secs(5))
///     .with_user_agent("my-editor/1.0");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AcquireConfig {
    /// Base URL the tag and asset name are appended to
    pub release_base_url: String,
    /// Artifact base name
    pub artifact_name: String,
    /// Argument passed when probing a candidate binary
    pub probe_arg: String,
    /// Upper bound on a probe run
    pub probe_timeout: Duration,
    /// Upper bound on establishing the connection
    pub connect_timeout: Duration,
    /// Upper bound on waiting for the next body chunk
    pub stall_timeout: Duration,
    /// User agent string for HTTP requests
    pub user_agent: String,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            release_base_url: DEFAULT_RELEASE_BASE_URL.to_string(),
            artifact_name: DEFAULT_ARTIFACT_NAME.to_string(),
            probe_arg: DEFAULT_PROBE_ARG.to_string(),
            probe_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(30),
            stall_timeout: Duration::from_secs(60),
            user_agent: concat!("prosemd-launch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Configuration that cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid release URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Release URL must use http or https: {0}")]
    UnsupportedScheme(String),

    #[error("Artifact name cannot be empty")]
    EmptyArtifactName,
}

impl AcquireConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the release store base URL.
    #[must_use]
    pub fn with_release_base_url(mut self, url: impl Into<String>) -> Self {
        self.release_base_url = url.into();
        self
    }

    /// Set the artifact base name.
    #[must_use]
    pub fn with_artifact_name(mut self, name: impl Into<String>) -> Self {
        self.artifact_name = name.into();
        self
    }

    /// Set the probe argument.
    #[must_use]
    pub fn with_probe_arg(mut self, arg: impl Into<String>) -> Self {
        self.probe_arg = arg.into();
        self
    }

    /// Set the probe timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set the connect timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set how long the download may go without receiving a chunk.
    ///
    /// Defaults to 60 seconds.
    #[must_use]
    pub const fn with_stall_timeout(mut self, timeout: Duration) -> Self {
        self.stall_timeout = timeout;
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check the deployment constants before any IO happens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.release_base_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.release_base_url.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(self.release_base_url.clone()));
        }
        if self.artifact_name.trim().is_empty() {
            return Err(ConfigError::EmptyArtifactName);
        }
        Ok(())
    }
}
