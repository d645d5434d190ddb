//! Shared fixtures for runtime integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};
use prosemd_core::{ArtifactBody, ArtifactTransport, ProgressEvent, ProgressSink, TransportError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use prosemd_runtime::TEMP_PREFIX;

pub const BASE_URL: &str = "https://github.com/kitten/prosemd-lsp/releases/download";

/// A shell script that answers every invocation with exit status 0.
pub const WORKING_SERVER: &[u8] = b"#!/bin/sh\necho \"prosemd-lsp: v0.1.0\"\nexit 0\n";

/// How the fake release store responds.
#[derive(Clone)]
pub enum Response {
    /// Serve the chunks with an accurate Content-Length.
    Body(Vec<Bytes>),
    /// Serve the chunks without a Content-Length.
    Unsized(Vec<Bytes>),
    /// Serve the chunks, then fail the stream.
    FailAfter(Vec<Bytes>),
    /// Serve the chunks, then never yield again.
    HangAfter(Vec<Bytes>),
    /// Advertise more bytes than are sent.
    Truncated(Vec<Bytes>),
    /// Reject the request with a status code.
    Status(u16),
    /// Accept the request and never answer it.
    NeverResponds,
}

/// A fake transport returning canned responses and recording requests.
pub struct FakeTransport {
    response: Response,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new(response: Response) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Serve `content` split into chunks of `chunk_size` bytes.
    pub fn serving(content: &[u8], chunk_size: usize) -> Self {
        Self::new(Response::Body(chunks(content, chunk_size)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactTransport for FakeTransport {
    async fn fetch(&self, url: &str) -> Result<ArtifactBody, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());

        let body = match self.response.clone() {
            Response::Body(chunks) => ArtifactBody::from_chunks(chunks),
            Response::Unsized(chunks) => {
                ArtifactBody::new(None, stream::iter(chunks.into_iter().map(Ok)).boxed())
            }
            Response::FailAfter(chunks) => {
                let total = length(&chunks) * 2;
                let failing = stream::iter(chunks.into_iter().map(Ok)).chain(stream::once(async {
                    Err(TransportError::Body("connection reset by peer".to_string()))
                }));
                ArtifactBody::new(Some(total), failing.boxed())
            }
            Response::HangAfter(chunks) => {
                let total = length(&chunks) * 2;
                let hanging = stream::iter(chunks.into_iter().map(Ok)).chain(stream::pending());
                ArtifactBody::new(Some(total), hanging.boxed())
            }
            Response::Truncated(chunks) => {
                let total = length(&chunks) + 10;
                ArtifactBody::new(Some(total), stream::iter(chunks.into_iter().map(Ok)).boxed())
            }
            Response::NeverResponds => std::future::pending().await,
            Response::Status(status) => {
                return Err(TransportError::Status {
                    status,
                    url: url.to_string(),
                });
            }
        };
        Ok(body)
    }
}

pub fn chunks(content: &[u8], chunk_size: usize) -> Vec<Bytes> {
    content
        .chunks(chunk_size)
        .map(Bytes::copy_from_slice)
        .collect()
}

fn length(chunks: &[Bytes]) -> u64 {
    chunks.iter().map(|c| c.len() as u64).sum()
}

/// Records every progress event.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn report(&self, event: &ProgressEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// In-flight download files left in `dir`.
pub fn temp_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| {
                    path.file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.starts_with(TEMP_PREFIX))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Write an executable shell script.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
