#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use hlsgrab_engine::hls::config::HlsPlaylistConfig;
use hlsgrab_engine::stream::BackoffConfig;
use hlsgrab_engine::{DownloaderConfig, HlsConfig, HttpFetcher, StreamConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const AUDIO_MPEG: &str = "audio/mpeg";
pub const M3U8: &str = "application/vnd.apple.mpegurl";
pub const TEXT: &str = "text/plain";

/// One canned answer for a path.
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type,
            body: body.into(),
        }
    }

    pub fn playlist(body: impl Into<String>) -> Self {
        Self::ok(M3U8, body.into())
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            content_type: TEXT,
            body: b"not found".to_vec(),
        }
    }
}

#[derive(Default)]
struct Routes {
    // The n-th request to a path gets the n-th reply; the last one repeats.
    replies: HashMap<String, Vec<Reply>>,
    request_counts: HashMap<String, usize>,
}

/// Local HTTP server answering from scripted replies.
pub struct TestServer {
    base_url: String,
    routes: Arc<Mutex<Routes>>,
}

impl TestServer {
    pub async fn new() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://127.0.0.1:{}", addr.port());

        let routes = Arc::new(Mutex::new(Routes::default()));
        let app = Router::new()
            .fallback(scripted_reply)
            .with_state(routes.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, routes }
    }

    pub fn script(&self, path: &str, replies: Vec<Reply>) {
        self.routes
            .lock()
            .unwrap()
            .replies
            .insert(path.to_string(), replies);
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request_count(&self, path: &str) -> usize {
        self.routes
            .lock()
            .unwrap()
            .request_counts
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

async fn scripted_reply(State(routes): State<Arc<Mutex<Routes>>>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    let reply = {
        let mut routes = routes.lock().unwrap();
        let count = routes.request_counts.entry(path.clone()).or_insert(0);
        let index = *count;
        *count += 1;
        routes
            .replies
            .get(&path)
            .and_then(|replies| replies.get(index).or_else(|| replies.last()))
            .cloned()
    };

    match reply {
        Some(reply) => (
            reply.status,
            [(header::CONTENT_TYPE, reply.content_type)],
            reply.body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn media_playlist(target_duration: u64, segments: &[&str], closed: bool) -> String {
    let mut playlist = format!(
        "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-TARGETDURATION:{target_duration}\n#EXT-X-MEDIA-SEQUENCE:0\n"
    );
    for segment in segments {
        playlist.push_str("#EXTINF:4.0,\n");
        playlist.push_str(segment);
        playlist.push('\n');
    }
    if closed {
        playlist.push_str("#EXT-X-ENDLIST\n");
    }
    playlist
}

pub fn fetcher() -> HttpFetcher {
    HttpFetcher::from_config(&DownloaderConfig::default()).unwrap()
}

/// HLS settings that never wait long between polls or retries.
pub fn fast_hls_config() -> HlsConfig {
    HlsConfig {
        playlist_config: HlsPlaylistConfig {
            fetch_retry_delay: Duration::from_millis(10),
            min_refresh_interval: Duration::from_millis(10),
            ..HlsPlaylistConfig::default()
        },
        ..HlsConfig::default()
    }
}

/// Stream settings with one tick per backoff phase and millisecond sleeps.
pub fn fast_stream_config() -> StreamConfig {
    StreamConfig {
        backoff: BackoffConfig {
            short_interval: Duration::from_millis(10),
            long_interval: Duration::from_millis(20),
            max_ticks: 1,
        },
        ..StreamConfig::default()
    }
}

/// What a [`RawServer`] does with one accepted connection, after reading the
/// request head.
#[derive(Clone, Debug)]
pub enum RawReply {
    /// Close without answering.
    Hangup,
    /// Write these bytes, then close.
    Respond(Vec<u8>),
    /// Write these bytes, then keep the connection open without sending more.
    Stall(Vec<u8>),
}

/// TCP server for failures an HTTP framework will not produce: dropped
/// connections and bodies shorter than their `Content-Length`. The n-th
/// connection gets the n-th reply; the last one repeats.
pub struct RawServer {
    base_url: String,
    connections: Arc<AtomicUsize>,
}

impl RawServer {
    pub async fn new(script: Vec<RawReply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://127.0.0.1:{}", addr.port());
        let connections = Arc::new(AtomicUsize::new(0));

        let counter = connections.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let index = counter.fetch_add(1, Ordering::SeqCst);
                let reply = script.get(index).or_else(|| script.last()).cloned();
                tokio::spawn(async move {
                    read_request_head(&mut socket).await;
                    match reply {
                        Some(RawReply::Respond(bytes)) => {
                            let _ = socket.write_all(&bytes).await;
                            let _ = socket.shutdown().await;
                        }
                        Some(RawReply::Stall(bytes)) => {
                            let _ = socket.write_all(&bytes).await;
                            tokio::time::sleep(Duration::from_secs(3600)).await;
                        }
                        Some(RawReply::Hangup) | None => {}
                    }
                });
            }
        });

        Self {
            base_url,
            connections,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

async fn read_request_head(socket: &mut TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}

/// A 200 response head declaring `content_length`, followed by `body`. A body
/// shorter than the declared length makes a truncated response.
pub fn raw_ok(content_type: &str, content_length: usize, body: &[u8]) -> Vec<u8> {
    let mut bytes = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\nContent-Length: {content_length}\r\nConnection: close\r\n\r\n"
    )
    .into_bytes();
    bytes.extend_from_slice(body);
    bytes
}
