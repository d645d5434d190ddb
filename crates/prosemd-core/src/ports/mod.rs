//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the acquisition core expects from
//! infrastructure. They contain no implementation details.
//!
//! # Design Rules
//!
//! - No `reqwest` or `tokio::process` types in any signature
//! - Every port has a no-op or fake implementation suitable for tests
//! - Logging is injected through [`Logger`]; the core never reaches for a global

pub mod logger;
pub mod probe;
pub mod progress;
pub mod transport;

pub use logger::{Logger, NoopLogger};
pub use probe::{ExecutableProbe, ProbeVerdict};
pub use progress::{NoopProgress, ProgressEvent, ProgressSink};
pub use transport::{ArtifactBody, ArtifactTransport, ChunkStream};

#[cfg(any(test, feature = "test-utils"))]
pub use probe::MockExecutableProbe;
#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockArtifactTransport;
