#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum HlsError {
    #[error("Failed to decode playlist: {0}")]
    Decode(String),
    #[error("Not a valid media playlist")]
    NotMediaPlaylist,
    #[error("Failed to unescape segment URI {uri}: {reason}")]
    Unescape { uri: String, reason: String },
    #[error("Invalid playlist URL: {0}")]
    InvalidUrl(String),
    #[error("Download job channel closed")]
    ChannelClosed,
}
