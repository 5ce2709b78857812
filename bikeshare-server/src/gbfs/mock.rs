//! Mock fetcher for testing without network access.
//!
//! Serves canned responses keyed by URL, optionally after a delay so tests
//! can control which of two concurrent fetches finishes first.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use super::client::Fetcher;
use super::error::FeedError;

/// A canned upstream answer.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub delay: Duration,
}

impl MockResponse {
    /// A 200 response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    /// A response with an arbitrary status code.
    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    /// Delay the answer.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// In-memory [`Fetcher`] that answers from a URL → response table.
#[derive(Clone, Default)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    requests: Arc<AtomicUsize>,
    completed: Arc<AtomicUsize>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the response served for `url`.
    pub async fn respond(&self, url: impl Into<String>, response: MockResponse) {
        let mut responses = self.responses.write().await;
        responses.insert(url.into(), response);
    }

    /// Total number of fetches served so far, across all URLs.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Number of fetches that have run to completion, delay included.
    pub fn completed_count(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let response = {
            let responses = self.responses.read().await;
            responses.get(url).cloned()
        };

        let Some(response) = response else {
            return Err(FeedError::Transport {
                url: url.to_string(),
                status: Some(404),
                message: format!("no mock response for {url}"),
            });
        };

        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        if response.status != 200 {
            return Err(FeedError::Transport {
                url: url.to_string(),
                status: Some(response.status),
                message: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        Ok(response.body)
    }
}
