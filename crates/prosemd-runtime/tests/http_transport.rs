//! `ReqwestTransport` against a one-shot local HTTP server.

use futures_util::StreamExt;
use prosemd_core::{AcquireConfig, AcquireError, ArtifactTransport, NoopProgress, TransportError};
use prosemd_runtime::{CancellationToken, DownloadOutcome, Downloader, ReqwestTransport};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve `response` to the first connection; the handle yields the request head.
async fn serve_once(response: Vec<u8>) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
            if head.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        socket.write_all(&response).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&head).to_string()
    });

    (format!("http://{addr}"), handle)
}

fn ok_response(body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

// Loopback requests must not be routed through an ambient HTTP_PROXY.
fn transport() -> ReqwestTransport {
    let config = AcquireConfig::new();
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .no_proxy()
        .build()
        .unwrap();
    ReqwestTransport::from_client(client)
}

#[test]
fn transport_builds_from_default_config() {
    assert!(ReqwestTransport::new(&AcquireConfig::new()).is_ok());
}

#[tokio::test]
async fn success_streams_body_with_length() {
    let (base, server) = serve_once(ok_response(b"hello world")).await;
    let url = format!("{base}/v0.1.0/prosemd-lsp-linux");

    let body = transport().fetch(&url).await.unwrap();
    assert_eq!(body.content_length, Some(11));

    let mut received = Vec::new();
    let mut chunks = body.chunks;
    while let Some(chunk) = chunks.next().await {
        received.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(received, b"hello world");

    let head = server.await.unwrap().to_ascii_lowercase();
    assert!(head.starts_with("get /v0.1.0/prosemd-lsp-linux http/1.1"));
    assert!(head.contains("user-agent: prosemd-launch/"));
}

#[tokio::test]
async fn not_found_is_a_status_error() {
    let response =
        b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nNot Found".to_vec();
    let (base, server) = serve_once(response).await;
    let url = format!("{base}/v9.9.9/prosemd-lsp-linux");

    let err = transport().fetch(&url).await.unwrap_err();

    assert!(matches!(err, TransportError::Status { status: 404, ref url } if url.contains("v9.9.9")));
    server.await.unwrap();
}

#[tokio::test]
async fn refused_connection_is_a_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = transport()
        .fetch(&format!("http://{addr}/v0.1.0/prosemd-lsp-linux"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Connection(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn downloader_installs_over_http() {
    let payload = vec![0x5au8; 32 * 1024];
    let (base, server) = serve_once(ok_response(&payload)).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("prosemd-lsp-v0.1.0");

    let downloader = Downloader::new(transport(), Duration::from_secs(10));
    let outcome = downloader
        .download(
            &format!("{base}/v0.1.0/prosemd-lsp-linux"),
            &dest,
            &NoopProgress,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome, DownloadOutcome::Completed { bytes: payload.len() as u64 });
    assert_eq!(std::fs::read(&dest).unwrap(), payload);
    server.await.unwrap();
}

#[tokio::test]
async fn silent_server_hits_the_stall_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(socket);
    });

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("prosemd-lsp-v0.1.0");
    let stall = Duration::from_millis(200);
    let downloader = Downloader::new(transport(), stall);

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        downloader.download(
            &format!("http://{addr}/v0.1.0/prosemd-lsp-linux"),
            &dest,
            &NoopProgress,
            &CancellationToken::new(),
        ),
    )
    .await
    .expect("download should give up on its own");

    assert!(matches!(
        result,
        Err(AcquireError::Transport(TransportError::Timeout(d))) if d == stall
    ));
    assert!(!dest.exists());
    server.abort();
}
