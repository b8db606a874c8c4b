// Entry point for a recording: decides whether the target is recorded as a
// raw stream or as an HLS playlist.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::hls::{HlsConfig, HlsRecorder, HlsSummary};
use crate::stream::{StreamConfig, StreamOutcome, StreamRecorder, StreamTarget, download_in_progress};
use crate::{DownloadError, DownloaderConfig, HttpFetcher};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RecordMode {
    /// Try the URL as a raw stream first, fall back to the playlist pipeline
    #[default]
    Auto,
    /// Raw audio stream only
    Stream,
    /// HLS media playlist only
    Playlist,
}

#[derive(Debug, Clone, Default)]
pub struct RecorderConfig {
    pub mode: RecordMode,
    pub downloader: DownloaderConfig,
    pub hls: HlsConfig,
    pub stream: StreamConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingOutcome {
    Stream(StreamOutcome),
    Playlist(HlsSummary),
    /// The output is already being written by someone else; nothing was done.
    InProgress,
}

pub struct Recorder {
    config: RecorderConfig,
    fetcher: HttpFetcher,
}

impl Recorder {
    pub fn new(config: RecorderConfig) -> Result<Self, DownloadError> {
        let fetcher = HttpFetcher::from_config(&config.downloader)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    pub fn with_fetcher(config: RecorderConfig, fetcher: HttpFetcher) -> Self {
        Self { config, fetcher }
    }

    pub async fn record(&self, url: &str, output: &Path) -> Result<RecordingOutcome, DownloadError> {
        info!(url, output = %output.display(), mode = ?self.config.mode, "Starting recording");
        match self.config.mode {
            RecordMode::Stream => {
                let outcome = self.record_stream(url, output).await?;
                Ok(Self::stream_outcome(outcome))
            }
            RecordMode::Playlist => {
                if download_in_progress(output, self.config.stream.in_progress_window).await {
                    info!("Download in progress for {}.", output.display());
                    return Ok(RecordingOutcome::InProgress);
                }
                self.record_playlist(url, output).await
            }
            RecordMode::Auto => match self.record_stream(url, output).await? {
                // The stream recorder already ran the guard and created the output.
                StreamOutcome::NotAStream => {
                    info!(url, "Not a raw stream, recording as a playlist");
                    self.record_playlist(url, output).await
                }
                outcome => Ok(Self::stream_outcome(outcome)),
            },
        }
    }

    async fn record_stream(&self, url: &str, output: &Path) -> Result<StreamOutcome, DownloadError> {
        let recorder = StreamRecorder::new(self.fetcher.clone(), self.config.stream.clone());
        recorder.record(&StreamTarget::new(url, output)).await
    }

    async fn record_playlist(
        &self,
        url: &str,
        output: &Path,
    ) -> Result<RecordingOutcome, DownloadError> {
        let recorder = HlsRecorder::new(Arc::new(self.config.hls.clone()), self.fetcher.clone());
        let summary = recorder.record(url, output).await?;
        Ok(RecordingOutcome::Playlist(summary))
    }

    fn stream_outcome(outcome: StreamOutcome) -> RecordingOutcome {
        match outcome {
            StreamOutcome::InProgress => RecordingOutcome::InProgress,
            other => RecordingOutcome::Stream(other),
        }
    }
}
