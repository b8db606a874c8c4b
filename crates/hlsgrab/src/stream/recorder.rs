use tracing::{info, warn};

use crate::classify::is_audio_stream;
use crate::output::open_append;
use crate::stream::backoff::{ProbeBackoff, ProbeDecision};
use crate::stream::direct::DirectDownloader;
use crate::stream::guard::download_in_progress;
use crate::stream::{StreamConfig, StreamTarget};
use crate::{DownloadError, HttpFetcher};

/// How a direct stream recording ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOutcome {
    /// The output was modified recently; another recorder is assumed to own it.
    InProgress,
    /// The very first probe was not an audio stream.
    NotAStream,
    /// The stream went away and did not come back within the backoff schedule.
    GaveUp,
}

pub struct StreamRecorder {
    fetcher: HttpFetcher,
    downloader: DirectDownloader,
    config: StreamConfig,
}

impl StreamRecorder {
    pub fn new(fetcher: HttpFetcher, config: StreamConfig) -> Self {
        let downloader = DirectDownloader::new(fetcher.clone());
        Self {
            fetcher,
            downloader,
            config,
        }
    }

    /// Records `target` until the stream is gone for good.
    ///
    /// Each probe that answers with an audio stream is copied to the output
    /// right away and resets the backoff; the target is probed again once the
    /// copy ends.
    pub async fn record(&self, target: &StreamTarget) -> Result<StreamOutcome, DownloadError> {
        if download_in_progress(&target.destination, self.config.in_progress_window).await {
            info!("Download in progress for {}.", target);
            return Ok(StreamOutcome::InProgress);
        }

        let mut out = open_append(&target.destination).await?;
        let mut backoff = ProbeBackoff::new(self.config.backoff);

        loop {
            let probe = match self.fetcher.get(&target.source_uri).await {
                Ok(response) if is_audio_stream(response.headers()) => Some(response),
                Ok(_) => None,
                Err(e) => {
                    warn!(uri = %target.source_uri, error = %e, "Stream probe failed");
                    None
                }
            };

            if let Some(response) = probe {
                backoff.on_stream();
                self.downloader
                    .copy_response(response, target, &mut out)
                    .await?;
                continue;
            }

            match backoff.on_non_stream() {
                ProbeDecision::Sleep(interval) => {
                    info!("Sleeping for {:?}.", interval);
                    tokio::time::sleep(interval).await;
                }
                ProbeDecision::Bail => {
                    info!("URL not a stream. Bailing.");
                    return Ok(StreamOutcome::NotAStream);
                }
                ProbeDecision::GiveUp => {
                    info!(uri = %target.source_uri, "Stream did not come back. Giving up.");
                    return Ok(StreamOutcome::GaveUp);
                }
            }
        }
    }
}
