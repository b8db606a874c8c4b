//! # hlsgrab
//!
//! A library for recording live media to a local file.
//!
//! Two kinds of targets are supported:
//!
//! - Live (or finished) HLS media playlists. The playlist is polled, every
//!   newly published segment is downloaded exactly once and appended to the
//!   output in arrival order.
//! - Raw audio elementary streams (`audio/mpeg`, `audio/aacp`). The response
//!   body is copied straight into the output, and the target is re-probed
//!   with an escalating backoff when the stream drops.
//!
//! [`Recorder`] picks between the two based on [`RecordMode`].

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod hls;
pub mod http;
pub mod output;
pub mod recorder;
pub mod stream;

pub use builder::DownloaderConfigBuilder;
pub use classify::{AUDIO_STREAM_MIME_TYPES, is_audio_stream};
pub use config::DownloaderConfig;
pub use error::DownloadError;
pub use http::{HttpFetcher, create_client};

pub use hls::{DownloadJob, HlsConfig, HlsError, HlsRecorder, TimelineMode};
pub use recorder::{RecordMode, Recorder, RecorderConfig, RecordingOutcome};
pub use stream::{StreamConfig, StreamOutcome, StreamRecorder, StreamTarget};
