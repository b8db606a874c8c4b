use std::time::Duration;

/// One segment handed from the playlist monitor to the segment writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    /// Fully resolved, unescaped segment URI
    pub source_uri: String,
    /// Position of the recording once this segment is written
    pub timeline_offset: Duration,
}

impl DownloadJob {
    pub fn new(source_uri: impl Into<String>, timeline_offset: Duration) -> Self {
        Self {
            source_uri: source_uri.into(),
            timeline_offset,
        }
    }
}
