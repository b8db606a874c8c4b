// HLS Segment Writer: the single consumer of download jobs. Appends every
// segment body to the output file in the order the jobs arrive.

use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::DownloadError;
use crate::hls::job::DownloadJob;
use crate::http::HttpFetcher;
use crate::output::{append_body, open_append};

/// Totals for one writer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub segments_written: u64,
    pub segments_dropped: u64,
    pub bytes_written: u64,
}

pub struct SegmentWriter {
    fetcher: HttpFetcher,
    output: PathBuf,
}

enum JobResult {
    Written(u64),
    Dropped,
}

impl SegmentWriter {
    pub fn new(fetcher: HttpFetcher, output: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            output: output.into(),
        }
    }

    /// Drains `segment_request_rx` until the monitor closes it.
    ///
    /// A segment that cannot be fetched, or answers with anything but 200, is
    /// logged and dropped. Failing to open or write the output file, or a body
    /// that breaks off after a 200, ends the run with an error.
    pub async fn run(
        self,
        mut segment_request_rx: mpsc::Receiver<DownloadJob>,
    ) -> Result<WriterStats, DownloadError> {
        let mut out = open_append(&self.output).await?;
        let mut stats = WriterStats::default();
        info!(output = %self.output.display(), "SegmentWriter started.");

        while let Some(job) = segment_request_rx.recv().await {
            match self.write_job(&job, &mut out).await? {
                JobResult::Written(bytes) => {
                    stats.segments_written += 1;
                    stats.bytes_written += bytes;
                    info!(
                        "Downloaded {}. Recorded {:?}.",
                        job.source_uri, job.timeline_offset
                    );
                }
                JobResult::Dropped => stats.segments_dropped += 1,
            }
        }

        out.flush().await?;
        info!(
            written = stats.segments_written,
            dropped = stats.segments_dropped,
            bytes = stats.bytes_written,
            "Job channel closed. SegmentWriter finished."
        );
        Ok(stats)
    }

    async fn write_job(&self, job: &DownloadJob, out: &mut File) -> Result<JobResult, DownloadError> {
        let response = match self.fetcher.get(&job.source_uri).await {
            Ok(response) => response,
            Err(e) => {
                warn!(uri = %job.source_uri, error = %e, "Segment fetch failed, dropping segment");
                return Ok(JobResult::Dropped);
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            warn!("Received HTTP {} for {}", response.status().as_u16(), job.source_uri);
            return Ok(JobResult::Dropped);
        }

        // A raw-stream job never ends on its own.
        let written = append_body(response, out).await?;
        debug!(uri = %job.source_uri, bytes = written, "Segment appended");
        Ok(JobResult::Written(written))
    }
}
