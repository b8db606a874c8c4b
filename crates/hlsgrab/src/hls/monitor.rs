// HLS Playlist Monitor: polls a media playlist and emits one download job per
// newly published segment.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, trace, warn};
use url::Url;

use crate::classify::is_audio_stream;
use crate::hls::cache::SegmentCache;
use crate::hls::config::HlsConfig;
use crate::hls::job::DownloadJob;
use crate::hls::playlist::{PlaylistDecoder, PlaylistSnapshot};
use crate::hls::resolve::resolve_segment_uri;
use crate::hls::timeline::Timeline;
use crate::hls::HlsError;
use crate::http::HttpFetcher;

/// Why the monitor stopped producing jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    /// The playlist reported itself finished.
    PlaylistClosed,
    /// The URL served a raw audio stream; a single job covering it was emitted.
    RawStream,
    /// The configured recording limit was reached.
    DurationLimitReached,
}

pub struct PlaylistMonitor {
    fetcher: HttpFetcher,
    decoder: Arc<dyn PlaylistDecoder>,
    config: Arc<HlsConfig>,
    playlist_url: Url,
    seen_segment_uris: SegmentCache,
    timeline: Timeline,
}

impl PlaylistMonitor {
    pub fn new(
        playlist_url: &str,
        fetcher: HttpFetcher,
        decoder: Arc<dyn PlaylistDecoder>,
        config: Arc<HlsConfig>,
    ) -> Result<Self, HlsError> {
        let playlist_url = Url::parse(playlist_url)
            .map_err(|e| HlsError::InvalidUrl(format!("{playlist_url}: {e}")))?;
        let seen_segment_uris =
            SegmentCache::with_capacity(config.playlist_config.seen_segments_capacity);
        let timeline = Timeline::new(config.playlist_config.timeline_mode);
        Ok(Self {
            fetcher,
            decoder,
            config,
            playlist_url,
            seen_segment_uris,
            timeline,
        })
    }

    /// Polls until the playlist closes, the URL turns out to be a raw stream,
    /// or the recording limit is hit.
    ///
    /// The monitor is the only sender on `segment_request_tx`; the channel is
    /// closed when this returns, whatever the outcome.
    pub async fn run(
        mut self,
        segment_request_tx: mpsc::Sender<DownloadJob>,
    ) -> Result<MonitorOutcome, HlsError> {
        let retry_delay = self.config.playlist_config.fetch_retry_delay;
        info!(url = %self.playlist_url, mode = ?self.timeline.mode(), "Monitoring playlist");

        loop {
            let response = match self.fetcher.get(self.playlist_url.as_str()).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(url = %self.playlist_url, error = %e, "Playlist fetch failed, retrying in {retry_delay:?}");
                    tokio::time::sleep(retry_delay).await;
                    continue;
                }
            };

            if is_audio_stream(response.headers()) {
                info!(url = %self.playlist_url, "URL is a raw audio stream, downloading it whole");
                let job = DownloadJob::new(
                    self.playlist_url.as_str(),
                    self.config.playlist_config.raw_stream_duration,
                );
                self.send_jobs(vec![job], &segment_request_tx).await?;
                return Ok(MonitorOutcome::RawStream);
            }

            let status = response.status();
            if !status.is_success() {
                warn!(url = %self.playlist_url, %status, "Playlist fetch returned HTTP {status}");
            }
            let playlist_bytes = match response.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(url = %self.playlist_url, error = %e, "Failed to read playlist body, retrying in {retry_delay:?}");
                    tokio::time::sleep(retry_delay).await;
                    continue;
                }
            };

            let snapshot = self.decoder.decode(&playlist_bytes).inspect_err(|e| {
                error!(url = %self.playlist_url, error = %e, "Unusable playlist");
            })?;

            let jobs = self.process_segments(&snapshot)?;
            if self.send_jobs(jobs, &segment_request_tx).await? {
                info!(
                    recorded = ?self.timeline.recorded(),
                    "Recording limit reached. Stopping monitoring."
                );
                return Ok(MonitorOutcome::DurationLimitReached);
            }

            if snapshot.closed {
                info!(url = %self.playlist_url, "Playlist closed. Stopping monitoring.");
                return Ok(MonitorOutcome::PlaylistClosed);
            }

            let delay = self.refresh_delay(&snapshot);
            trace!(delay = ?delay, "Waiting for next playlist refresh");
            tokio::time::sleep(delay).await;
        }
    }

    /// Pause before the next poll: the playlist's target duration, never
    /// shorter than the configured minimum.
    fn refresh_delay(&self, snapshot: &PlaylistSnapshot) -> Duration {
        snapshot
            .target_duration
            .max(self.config.playlist_config.min_refresh_interval)
    }

    /// Turns the unseen segments of a snapshot into jobs, in declared order.
    fn process_segments(
        &mut self,
        snapshot: &PlaylistSnapshot,
    ) -> Result<Vec<DownloadJob>, HlsError> {
        let mut jobs_to_send = Vec::new();
        for segment in &snapshot.segments {
            let Some(absolute_segment_uri) = resolve_segment_uri(&self.playlist_url, &segment.uri)?
            else {
                continue;
            };

            if self.seen_segment_uris.contains(&absolute_segment_uri) {
                trace!("Segment {} already seen, skipping.", absolute_segment_uri);
                continue;
            }

            self.seen_segment_uris.insert(absolute_segment_uri.clone());
            let timeline_offset = self.timeline.advance(segment.duration);
            debug!("New segment detected: {}", absolute_segment_uri);
            jobs_to_send.push(DownloadJob::new(absolute_segment_uri, timeline_offset));
        }
        Ok(jobs_to_send)
    }

    /// Sends jobs to the writer. Returns true when a job at or past the
    /// recording limit went out; nothing after it is sent.
    async fn send_jobs(
        &self,
        jobs: Vec<DownloadJob>,
        segment_request_tx: &mpsc::Sender<DownloadJob>,
    ) -> Result<bool, HlsError> {
        let limit = self.config.playlist_config.max_duration;
        for job in jobs {
            let offset = job.timeline_offset;
            debug!("Sending segment job: {:?}", job.source_uri);
            if segment_request_tx.send(job).await.is_err() {
                error!(url = %self.playlist_url, "Segment writer channel closed.");
                return Err(HlsError::ChannelClosed);
            }
            if limit.is_some_and(|limit| offset >= limit) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
