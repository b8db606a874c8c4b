// Direct recording of raw audio streams, for targets that are not playlists.

pub mod backoff;
pub mod direct;
pub mod guard;
pub mod recorder;
pub mod target;

use std::time::Duration;

pub use backoff::{BackoffConfig, ProbeBackoff, ProbeDecision, ProbeState};
pub use direct::DirectDownloader;
pub use guard::{IN_PROGRESS_WINDOW, download_in_progress, is_recent_modification};
pub use recorder::{StreamOutcome, StreamRecorder};
pub use target::StreamTarget;

#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub backoff: BackoffConfig,
    /// An output modified more recently than this is assumed to have another writer
    pub in_progress_window: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            backoff: BackoffConfig::default(),
            in_progress_window: IN_PROGRESS_WINDOW,
        }
    }
}
