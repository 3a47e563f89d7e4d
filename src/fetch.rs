//! Shared HTTP fetch client.
//!
//! Both crawlers retrieve pages through the [`Fetch`] trait so tests can
//! substitute canned responses for the network. The production
//! implementation, [`HttpFetcher`], wraps a single [`reqwest::Client`]
//! configured with the browser user agent and the fixed fetch timeout.
//!
//! This layer does not retry. A failed fetch surfaces as a
//! [`FetchError`] and the caller decides whether that means a skipped item,
//! a placeholder body, or a zero-item category.

use crate::error::FetchError;
use std::time::Duration;
use tracing::debug;

/// Retrieve a remote page as body text.
///
/// Implementations must treat every call as independent: no retries, no
/// caching, no shared mutable state between calls.
pub trait Fetch {
    /// GET `url` and return the response body on a 2xx status.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher over a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the given user agent and connect/read timeout
    /// applied to every request.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
