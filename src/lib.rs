//! # VN News Crawler
//!
//! A multi-source crawler for Vietnamese news: article listings come from
//! the VnExpress RSS feeds and the Otofun forum, get normalized into a
//! common [`Article`] record, deduplicated by link, and enriched with full
//! body text (and a representative image) by following each listing link
//! into its detail or thread page.
//!
//! ## Architecture
//!
//! One crawl run is a sequential pipeline:
//! 1. **Listing**: each crawler fetches its category's feed or listing
//!    pages and collects entries, applying dedup and the item limit
//! 2. **Detail**: one secondary fetch per entry extracts the body text
//! 3. **Persist**: the orchestrator hands each category batch to the
//!    storage collaborator as soon as it is produced
//!
//! Failures degrade instead of propagating: a failed detail fetch empties
//! one article's body, a failed listing fetch empties one category, and the
//! run itself always completes.
//!
//! ## Usage
//!
//! ```ignore
//! let config = CrawlConfig::default();
//! let fetcher = HttpFetcher::new(&config.user_agent, config.timeout)?;
//! let store = MemoryStore::new();
//! let summary = run_crawl(&config, &fetcher, &store).await?;
//! ```

pub mod config;
pub mod crawlers;
pub mod error;
pub mod fetch;
pub mod models;
pub mod orchestrator;
pub mod rss;
pub mod storage;

pub use config::CrawlConfig;
pub use error::{CrawlError, FetchError, StoreError};
pub use fetch::{Fetch, HttpFetcher};
pub use models::Article;
pub use orchestrator::{CrawlSummary, run_crawl};
pub use storage::{MemoryStore, NewsStore};
