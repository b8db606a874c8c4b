use std::time::Duration;

use reqwest::header::HeaderMap;

/// User agent sent when none is configured: identifies the tool and version.
pub const DEFAULT_USER_AGENT: &str = concat!("hlsgrab/", env!("CARGO_PKG_VERSION"));

/// Configurable options for the HTTP side of the recorder
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Overall timeout for a request, zero disables it
    pub timeout: Duration,

    /// Connection timeout, zero disables it
    pub connect_timeout: Duration,

    /// Whether to follow redirects
    pub follow_redirects: bool,

    /// User agent string, sent with every request
    pub user_agent: String,

    /// Extra HTTP headers for requests. Empty unless the user adds some.
    pub headers: HeaderMap,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            // Live streams never finish, so there is no overall timeout by default.
            timeout: Duration::ZERO,
            connect_timeout: Duration::ZERO,
            follow_redirects: true,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            headers: HeaderMap::new(),
        }
    }
}

impl DownloaderConfig {
    pub fn builder() -> crate::builder::DownloaderConfigBuilder {
        crate::builder::DownloaderConfigBuilder::new()
    }
}
