//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use secrecy::Secret;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use vehicle_lookup::config::{FallbackMode, LookupConfig};
use vehicle_lookup::{HttpServer, Shutdown};

/// A running lookup service bound to an ephemeral port.
pub struct TestService {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_tx: mpsc::UnboundedSender<LookupConfig>,
}

impl TestService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Configuration pointing at `endpoint` with a short upstream deadline.
pub fn config_for(endpoint: &str, api_key: Option<&str>, mode: FallbackMode) -> LookupConfig {
    let mut config = LookupConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.upstream.endpoint = endpoint.to_string();
    config.upstream.timeout_secs = 1;
    config.listener.request_timeout_secs = 5;
    config.upstream.api_key = api_key.map(|k| Secret::new(k.to_string()));
    config.fallback.mode = mode;
    config
}

/// Start the lookup service with the given configuration.
pub async fn spawn_service(config: LookupConfig) -> TestService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    TestService {
        addr,
        shutdown,
        config_tx,
    }
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start a programmable upstream that answers every request with the
/// `(status, body)` produced by `f`. Returns its `/vehicles` URL.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> String
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        drain_request(&mut socket).await;
                        let (status, body) = f().await;
                        let reason = StatusCode::from_u16(status)
                            .ok()
                            .and_then(|s| s.canonical_reason())
                            .unwrap_or("Unknown");

                        let response_str = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    format!("http://{}/vehicles", addr)
}

/// Read one request (headers plus Content-Length body) off the socket.
#[allow(dead_code)]
async fn drain_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);

            if buf.len() >= header_end + 4 + content_length {
                return;
            }
        }
    }
}
