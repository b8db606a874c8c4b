// HLS Recorder: wires the playlist monitor to the segment writer and runs both.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::DownloadError;
use crate::hls::config::HlsConfig;
use crate::hls::job::DownloadJob;
use crate::hls::monitor::{MonitorOutcome, PlaylistMonitor};
use crate::hls::playlist::{M3u8PlaylistDecoder, PlaylistDecoder};
use crate::hls::worker::{SegmentWriter, WriterStats};
use crate::http::HttpFetcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HlsSummary {
    pub outcome: MonitorOutcome,
    pub stats: WriterStats,
}

pub struct HlsRecorder {
    config: Arc<HlsConfig>,
    fetcher: HttpFetcher,
    decoder: Arc<dyn PlaylistDecoder>,
}

impl HlsRecorder {
    pub fn new(config: Arc<HlsConfig>, fetcher: HttpFetcher) -> Self {
        Self::with_decoder(config, fetcher, Arc::new(M3u8PlaylistDecoder))
    }

    pub fn with_decoder(
        config: Arc<HlsConfig>,
        fetcher: HttpFetcher,
        decoder: Arc<dyn PlaylistDecoder>,
    ) -> Self {
        Self {
            config,
            fetcher,
            decoder,
        }
    }

    /// Records the playlist at `playlist_url` into `output`.
    ///
    /// The monitor (producer) and writer (consumer) run as separate tasks
    /// joined by a bounded channel. Returns once the monitor has stopped and
    /// the writer has drained every queued job, or as soon as either one fails.
    pub async fn record(
        &self,
        playlist_url: &str,
        output: &Path,
    ) -> Result<HlsSummary, DownloadError> {
        let monitor = PlaylistMonitor::new(
            playlist_url,
            self.fetcher.clone(),
            Arc::clone(&self.decoder),
            Arc::clone(&self.config),
        )?;
        let writer = SegmentWriter::new(self.fetcher.clone(), output);

        let (segment_request_tx, segment_request_rx) =
            mpsc::channel::<DownloadJob>(self.config.pipeline_config.channel_capacity.max(1));

        let mut writer_handle = tokio::spawn(writer.run(segment_request_rx));
        let mut monitor_handle = tokio::spawn(monitor.run(segment_request_tx));

        let (outcome, stats) = tokio::select! {
            writer_result = &mut writer_handle => {
                let stats = match writer_result? {
                    Ok(stats) => stats,
                    Err(e) => {
                        error!(error = %e, "Segment writer failed");
                        monitor_handle.abort();
                        return Err(e);
                    }
                };
                debug!("Segment writer task finished.");
                let outcome = monitor_handle
                    .await?
                    .inspect_err(|e| error!(error = %e, "Playlist monitor failed"))?;
                (outcome, stats)
            }
            monitor_result = &mut monitor_handle => {
                let outcome = match monitor_result? {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(error = %e, "Playlist monitor failed");
                        writer_handle.abort();
                        return Err(e.into());
                    }
                };
                debug!("Playlist monitor task finished.");
                // The channel is closed now; the writer drains what is queued.
                let stats = writer_handle.await??;
                (outcome, stats)
            }
        };

        info!(
            url = playlist_url,
            outcome = ?outcome,
            segments = stats.segments_written,
            dropped = stats.segments_dropped,
            bytes = stats.bytes_written,
            "HLS recording complete"
        );
        Ok(HlsSummary { outcome, stats })
    }
}
