use std::time::Duration;

use crate::hls::cache::SEEN_SEGMENTS_CAPACITY;
use crate::hls::timeline::TimelineMode;

// --- Top-Level Configuration ---
#[derive(Debug, Clone, Default)]
pub struct HlsConfig {
    pub playlist_config: HlsPlaylistConfig,
    pub pipeline_config: HlsPipelineConfig,
}

// --- Playlist Configuration ---
#[derive(Debug, Clone)]
pub struct HlsPlaylistConfig {
    /// Pause after a playlist fetch fails at the transport level
    pub fetch_retry_delay: Duration,
    pub timeline_mode: TimelineMode,
    /// Shortest pause between two polls of a live playlist, whatever its target duration says
    pub min_refresh_interval: Duration,
    /// Stop once the recorded timeline reaches this offset. None records until the playlist closes.
    pub max_duration: Option<Duration>,
    pub seen_segments_capacity: usize,
    /// Nominal duration given to the single job emitted when the playlist URL
    /// turns out to be a raw audio stream
    pub raw_stream_duration: Duration,
}

impl Default for HlsPlaylistConfig {
    fn default() -> Self {
        Self {
            fetch_retry_delay: Duration::from_secs(3),
            timeline_mode: TimelineMode::default(),
            min_refresh_interval: Duration::from_secs(1),
            max_duration: None,
            seen_segments_capacity: SEEN_SEGMENTS_CAPACITY,
            raw_stream_duration: Duration::from_secs(12 * 60 * 60),
        }
    }
}

// --- Pipeline Configuration ---
#[derive(Debug, Clone)]
pub struct HlsPipelineConfig {
    pub channel_capacity: usize, // Jobs buffered between monitor and writer
}

impl Default for HlsPipelineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
        }
    }
}
