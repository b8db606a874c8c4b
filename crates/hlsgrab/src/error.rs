use crate::hls::HlsError;

// Error type for recording operations. Anything that reaches the caller as
// `Err` is fatal; recoverable conditions are logged where they happen.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HLS error: {0}")]
    HlsError(#[from] HlsError),

    #[error("Task error: {0}")]
    TaskError(String),
}

impl From<tokio::task::JoinError> for DownloadError {
    fn from(err: tokio::task::JoinError) -> Self {
        DownloadError::TaskError(err.to_string())
    }
}
