//! Storage seam between the crawler and the persistence collaborator.
//!
//! The orchestrator only needs the write path: an idempotent upsert keyed by
//! article id. The count and filtered read exist for the collaborators that
//! consume crawled articles (and for the CLI binary's JSON export). A real
//! deployment plugs a database-backed implementation into [`NewsStore`];
//! [`MemoryStore`] covers tests and one-shot runs.

use crate::error::StoreError;
use crate::models::Article;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Write and read contract of the article store.
pub trait NewsStore: Send + Sync {
    /// Insert-or-replace every article in the batch, keyed by `id`.
    async fn upsert_batch(&self, articles: &[Article]) -> Result<(), StoreError>;

    /// Number of stored articles.
    async fn count(&self) -> Result<usize, StoreError>;

    /// Articles for one source and category, newest first.
    async fn by_source_category(
        &self,
        source: &str,
        category: &str,
    ) -> Result<Vec<Article>, StoreError>;

    /// Every stored article, newest first.
    async fn all(&self) -> Result<Vec<Article>, StoreError>;
}

/// In-memory [`NewsStore`] keyed by article id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: Mutex<HashMap<String, Article>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first, with id as a tiebreaker so reads are deterministic.
fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });
}

impl NewsStore for MemoryStore {
    async fn upsert_batch(&self, articles: &[Article]) -> Result<(), StoreError> {
        let mut stored = self.articles.lock().await;
        for article in articles {
            stored.insert(article.id.clone(), article.clone());
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.articles.lock().await.len())
    }

    async fn by_source_category(
        &self,
        source: &str,
        category: &str,
    ) -> Result<Vec<Article>, StoreError> {
        let stored = self.articles.lock().await;
        let mut matches: Vec<Article> = stored
            .values()
            .filter(|a| a.source == source && a.category == category)
            .cloned()
            .collect();
        sort_newest_first(&mut matches);
        Ok(matches)
    }

    async fn all(&self) -> Result<Vec<Article>, StoreError> {
        let stored = self.articles.lock().await;
        let mut articles: Vec<Article> = stored.values().cloned().collect();
        sort_newest_first(&mut articles);
        Ok(articles)
    }
}
