//! Error types for the crawler pipeline.
//!
//! The error taxonomy is deliberately shallow: almost every failure in this
//! crate is recoverable at its call site and gets converted into an empty or
//! placeholder value rather than propagated. The types here exist for the
//! narrow set of failures that *do* cross a boundary:
//!
//! - [`FetchError`]: a single HTTP fetch or feed parse failed. Callers treat
//!   this as "no data from this fetch", never as a fatal condition.
//! - [`CrawlError`]: an entire category listing could not be retrieved. The
//!   orchestrator catches this per category and continues with the next one.
//! - [`StoreError`]: a persistence operation failed. Logged by the
//!   orchestrator; a failed batch never aborts the run.

use thiserror::Error;

/// Failure of a single page or feed fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure: connection error, timeout, invalid URL, or a
    /// body that could not be read.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {status} fetching {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body could not be parsed as XML (feed pages only).
    #[error("feed parse failed: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// A category-level crawl failure: the listing or feed page for a category
/// could not be fetched at all, so the category yields zero items.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("{site} listing for '{category}' failed")]
    Listing {
        site: &'static str,
        category: String,
        #[source]
        cause: FetchError,
    },
}

/// Failure of a storage operation.
///
/// The bundled [`MemoryStore`](crate::storage::MemoryStore) never produces
/// this, but implementations backed by a real database will.
#[derive(Debug, Error)]
#[error("storage operation failed: {0}")]
pub struct StoreError(pub String);
