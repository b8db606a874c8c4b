// HLS recording: a playlist monitor producing download jobs and a single
// writer draining them into the output file.

pub mod cache;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod job;
pub mod monitor;
pub mod playlist;
pub mod resolve;
pub mod timeline;
pub mod worker;

pub use cache::{SEEN_SEGMENTS_CAPACITY, SegmentCache};
pub use config::HlsConfig;
pub use coordinator::{HlsRecorder, HlsSummary};
pub use error::HlsError;
pub use job::DownloadJob;
pub use monitor::{MonitorOutcome, PlaylistMonitor};
pub use playlist::{M3u8PlaylistDecoder, PlaylistDecoder, PlaylistSegment, PlaylistSnapshot};
pub use timeline::{Timeline, TimelineMode};
pub use worker::{SegmentWriter, WriterStats};
