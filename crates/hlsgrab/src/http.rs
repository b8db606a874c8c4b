use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use crate::{DownloadError, DownloaderConfig};

/// Create a reqwest Client with the provided configuration.
///
/// The user agent and any extra headers are attached to every request the
/// client sends; nothing else is added.
pub fn create_client(config: &DownloaderConfig) -> Result<Client, DownloadError> {
    let mut client_builder = Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(config.headers.clone())
        .redirect(if config.follow_redirects {
            reqwest::redirect::Policy::limited(10)
        } else {
            reqwest::redirect::Policy::none()
        });

    if !config.timeout.is_zero() {
        client_builder = client_builder.timeout(config.timeout);
    }

    if !config.connect_timeout.is_zero() {
        client_builder = client_builder.connect_timeout(config.connect_timeout);
    }

    client_builder.build().map_err(DownloadError::from)
}

/// Thin GET wrapper shared by every component that talks HTTP.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &DownloaderConfig) -> Result<Self, DownloadError> {
        Ok(Self::new(create_client(config)?))
    }

    /// Issues a GET for `uri`. The status code is not checked here; callers
    /// decide what a non-200 response means for them.
    pub async fn get(&self, uri: &str) -> Result<Response, DownloadError> {
        let url = Url::parse(uri).map_err(|e| DownloadError::UrlError(format!("{uri}: {e}")))?;
        debug!(uri = %url, "GET");
        let response = self.client.get(url).send().await?;
        Ok(response)
    }
}
