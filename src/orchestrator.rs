//! Crawl run orchestration.
//!
//! One run walks both crawlers across their fixed category lists, persisting
//! each source/category batch the moment it is produced so partial progress
//! is durable even when a later category fails. Per-category failures are
//! logged and counted, never propagated: the run reports success with
//! whatever data it managed to collect, which is the contract the scheduling
//! collaborator relies on.

use crate::config::CrawlConfig;
use crate::crawlers::otofun::OtofunCrawler;
use crate::crawlers::vnexpress::VnExpressCrawler;
use crate::error::CrawlError;
use crate::fetch::Fetch;
use crate::models::Article;
use crate::storage::NewsStore;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Counts for one completed crawl run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlSummary {
    /// Articles produced across both sources.
    pub total: usize,
    /// Articles produced by the VnExpress crawler.
    pub vnexpress: usize,
    /// Articles produced by the Otofun crawler.
    pub otofun: usize,
    /// Categories that yielded an error instead of a result list.
    pub failed_categories: usize,
}

/// Run one full crawl pass over every configured category of both sources.
///
/// This is the single entry point the scheduling collaborator invokes. It
/// returns `Ok` even when every category failed; the summary's counters are
/// the only signal of partial or total failure.
#[instrument(level = "info", skip_all)]
pub async fn run_crawl<F: Fetch, S: NewsStore>(
    config: &CrawlConfig,
    fetcher: &F,
    store: &S,
) -> Result<CrawlSummary, CrawlError> {
    let started = Instant::now();
    info!(
        vnexpress_categories = config.vnexpress.categories.len(),
        otofun_categories = config.otofun.categories.len(),
        "Crawl run starting"
    );

    let mut summary = CrawlSummary::default();

    let vnexpress = VnExpressCrawler::new(&config.vnexpress);
    for category in &config.vnexpress.categories {
        match vnexpress
            .crawl(fetcher, category, config.vnexpress.limit)
            .await
        {
            Ok(articles) => {
                info!(%category, count = articles.len(), "VnExpress category done");
                summary.vnexpress += articles.len();
                persist_batch(store, &articles).await;
            }
            Err(e) => {
                error!(%category, error = %e, "VnExpress category failed; continuing");
                summary.failed_categories += 1;
            }
        }
    }

    let otofun = OtofunCrawler::new(&config.otofun);
    for category in &config.otofun.categories {
        match otofun.crawl(fetcher, category, config.otofun.limit).await {
            Ok(articles) => {
                info!(%category, count = articles.len(), "Otofun category done");
                summary.otofun += articles.len();
                persist_batch(store, &articles).await;
            }
            Err(e) => {
                error!(%category, error = %e, "Otofun category failed; continuing");
                summary.failed_categories += 1;
            }
        }
    }

    summary.total = summary.vnexpress + summary.otofun;
    info!(
        total = summary.total,
        vnexpress = summary.vnexpress,
        otofun = summary.otofun,
        failed_categories = summary.failed_categories,
        elapsed_secs = started.elapsed().as_secs(),
        "Crawl run complete"
    );
    Ok(summary)
}

/// Persist one category batch immediately. A store error is logged and the
/// run continues; losing one batch must not cost the rest of the crawl.
async fn persist_batch<S: NewsStore>(store: &S, articles: &[Article]) {
    if articles.is_empty() {
        return;
    }
    if let Err(e) = store.upsert_batch(articles).await {
        error!(count = articles.len(), error = %e, "Failed to persist batch");
        return;
    }
    match store.count().await {
        Ok(count) => debug!(count, "Store size after batch"),
        Err(e) => debug!(error = %e, "Store count unavailable"),
    }
}
