use thiserror::Error;

/// Failures that end the process with exit code 1.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("local I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("recording failed: {0}")]
    Download(#[from] hlsgrab_engine::DownloadError),

    #[error("invalid argument: {0}")]
    InvalidInput(String),

    #[error("could not parse value: {0}")]
    ParseError(String),

    #[error("could not initialize logging: {0}")]
    Initialization(String),
}
