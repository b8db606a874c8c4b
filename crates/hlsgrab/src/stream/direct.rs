use reqwest::{Response, StatusCode};
use tokio::fs::File;
use tracing::{info, warn};

use crate::output::append_body;
use crate::stream::StreamTarget;
use crate::{DownloadError, HttpFetcher};

/// Copies a single URI's body into an already opened output.
#[derive(Debug, Clone)]
pub struct DirectDownloader {
    fetcher: HttpFetcher,
}

impl DirectDownloader {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetches `target` and appends its body to `out`.
    ///
    /// Returns `Ok(None)` when nothing was written because the request failed
    /// or the status was not 200, and `Ok(Some(bytes))` after a full copy.
    pub async fn download(
        &self,
        target: &StreamTarget,
        out: &mut File,
    ) -> Result<Option<u64>, DownloadError> {
        match self.fetcher.get(&target.source_uri).await {
            Ok(response) => self.copy_response(response, target, out).await,
            Err(e) => {
                warn!(uri = %target.source_uri, error = %e, "Stream fetch failed");
                Ok(None)
            }
        }
    }

    /// Appends an already received response to `out`. Any failure once a 200
    /// body is being copied is an error: a half-copied stream is not usable.
    pub async fn copy_response(
        &self,
        response: Response,
        target: &StreamTarget,
        out: &mut File,
    ) -> Result<Option<u64>, DownloadError> {
        if response.status() != StatusCode::OK {
            warn!(
                "Received HTTP {} for {}.",
                response.status().as_u16(),
                target.source_uri
            );
            return Ok(None);
        }

        info!(
            "Downloading {} to {}.",
            target.source_uri,
            target.destination.display()
        );
        let written = append_body(response, out).await?;

        info!("Downloaded {} kb from {}.", written / 1000, target.source_uri);
        Ok(Some(written))
    }
}
