//! The fetch capability the pager is built on
//!
//! [`Search`](crate::pubmed::Search) never talks to the network directly. It is
//! handed something implementing [`Fetch`], which is [`HttpFetcher`] in
//! production and a canned-payload double in tests.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::pubmed::Request;

/// Turns a [`Request`] into the raw response payload
///
/// Implementations own the wire protocol: URL layout, headers, timeouts.
/// They must not retry or reinterpret the payload.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Vec<u8>, TransportError>;
}

#[async_trait]
impl<T: Fetch + ?Sized> Fetch for &T {
    async fn fetch(&self, request: &Request) -> Result<Vec<u8>, TransportError> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl<T: Fetch + ?Sized> Fetch for Arc<T> {
    async fn fetch(&self, request: &Request) -> Result<Vec<u8>, TransportError> {
        (**self).fetch(request).await
    }
}

/// [`Fetch`] over HTTP GET against the NCBI E-utilities
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl HttpFetcher {
    /// Create a fetcher with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_pager::HttpFetcher;
    ///
    /// let fetcher = HttpFetcher::new().unwrap();
    /// ```
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(ClientConfig::new())
    }

    /// Create a fetcher with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_pager::{ClientConfig, HttpFetcher};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@university.edu");
    ///
    /// let fetcher = HttpFetcher::with_config(config).unwrap();
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Create a fetcher around an existing reqwest client
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();

        Self {
            client,
            base_url,
            config,
        }
    }

    /// Full URL for `request`, including the identification parameters
    pub fn build_url(&self, request: &Request) -> String {
        let mut url = format!("{}/{}", self.base_url, request.path_and_query());

        for (key, value) in self.config.build_api_params() {
            url.push('&');
            url.push_str(&key);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }

        url
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    #[instrument(skip(self, request), fields(endpoint = request.endpoint()))]
    async fn fetch(&self, request: &Request) -> Result<Vec<u8>, TransportError> {
        let url = self.build_url(request);

        debug!("Making API request to: {}", url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("API request failed with status: {}", status);
            return Err(TransportError::ApiError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Received successful API response");

        Ok(body.to_vec())
    }
}
