//! Raw feed fetcher.
//!
//! Issues a single identified GET with a bounded timeout and hands back the
//! body bytes untouched. Decoding and retrying belong to the callers.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::error::FeedError;

/// Header the upstream uses to identify API consumers.
pub const CLIENT_IDENTIFIER_HEADER: &str = "client-identifier";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Something that can GET a feed URL and return its raw body.
///
/// Implementations are cloned into spawned tasks, one per feed.
pub trait Fetcher: Clone + Send + Sync + 'static {
    /// GET `url`. Any non-200 answer is a [`FeedError::Transport`].
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FeedError>> + Send;
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Value of the `Client-Identifier` header
    pub client_id: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FetcherConfig {
    /// Create a new config with the given client identifier.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// reqwest-backed [`Fetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();

        let client_id =
            HeaderValue::from_str(&config.client_id).map_err(|_| FeedError::Setup {
                message: format!("invalid client identifier: {:?}", config.client_id),
            })?;
        headers.insert(HeaderName::from_static(CLIENT_IDENTIFIER_HEADER), client_id);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FeedError::Setup {
                message: e.to_string(),
            })?;

        Ok(Self { http })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::transport(url, e))?;

        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Transport {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::transport(url, e))?;

        Ok(body.to_vec())
    }
}
