//! Fluent construction of [`DownloaderConfig`].
//!
//! ```
//! use std::time::Duration;
//! use hlsgrab_engine::DownloaderConfig;
//!
//! let config = DownloaderConfig::builder()
//!     .with_user_agent("station-archiver/2.1")
//!     .with_header("Referer", "https://radio.example.com/")
//!     .with_connect_timeout(Duration::from_secs(10))
//!     .build();
//!
//! assert_eq!(config.user_agent, "station-archiver/2.1");
//! assert!(config.timeout.is_zero());
//! ```

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

use crate::DownloaderConfig;

#[derive(Debug, Clone, Default)]
pub struct DownloaderConfigBuilder {
    config: DownloaderConfig,
}

impl DownloaderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps a whole request. Leave at zero for live recordings, which never end.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.config.follow_redirects = follow;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Adds one request header. A name or value that is not valid HTTP is
    /// logged and dropped.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let (name, value) = (name.as_ref(), value.as_ref());
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.config.headers.append(name, value);
            }
            _ => warn!(header = name, "Ignoring invalid request header"),
        }
        self
    }

    /// Merges `headers` into the ones already configured.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.config.headers.extend(headers);
        self
    }

    pub fn build(self) -> DownloaderConfig {
        self.config
    }
}
