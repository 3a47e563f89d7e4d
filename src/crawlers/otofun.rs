//! Otofun forum crawler.
//!
//! Listings are XenForo category pages, walked page by page until enough
//! threads are collected, a page comes back empty, or the page ceiling is
//! reached. Each thread link gets one secondary fetch into the thread page,
//! where the first post's `bbWrapper` holds the body text and usually an
//! image.
//!
//! The forum exposes no reliable per-thread publish time on the listing, so
//! articles are stamped with crawl time.

use crate::config::ForumConfig;
use crate::error::{CrawlError, FetchError};
use crate::fetch::Fetch;
use crate::models::{self, Article};
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

const SOURCE: &str = "Otofun";

/// Body used when a thread page has no recognizable first post.
const MISSING_BODY: &str = "Xem chi tiết tại diễn đàn.";
/// Body used when the thread page could not be fetched at all.
const FETCH_FAILED_BODY: &str = "Lỗi tải nội dung.";

static THREAD_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.structItem-title").unwrap());
static THREAD_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="/threads/"]"#).unwrap());
static FIRST_POST: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.message--post").unwrap());
static POST_BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("div.bbWrapper").unwrap());
static POST_IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img.bbImage, img").unwrap());
static THREAD_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(\d+)/?$").unwrap());

/// A listing entry that passed dedup, waiting for its thread fetch.
struct PendingThread {
    id: String,
    title: String,
    link: String,
}

/// Stateless crawler over the Otofun forum listings.
pub struct OtofunCrawler<'a> {
    config: &'a ForumConfig,
}

impl<'a> OtofunCrawler<'a> {
    pub fn new(config: &'a ForumConfig) -> Self {
        Self { config }
    }

    /// Crawl one forum category, returning at most `limit` articles in
    /// listing order.
    ///
    /// Unknown categories resolve to the default category's listing. A
    /// failed first-page fetch fails the category; a failure on a later
    /// page keeps whatever was already collected. A failed thread fetch
    /// only substitutes a placeholder body.
    #[instrument(level = "info", skip(self, fetcher))]
    pub async fn crawl<F: Fetch>(
        &self,
        fetcher: &F,
        category: &str,
        limit: usize,
    ) -> Result<Vec<Article>, CrawlError> {
        let listing_url = self.config.listing_for(category);
        info!(%category, %listing_url, "Crawling Otofun listing");

        let mut seen: HashSet<String> = HashSet::new();
        let mut picked: Vec<PendingThread> = Vec::new();
        let mut page = 1;

        while picked.len() < limit && page <= self.config.max_pages {
            let page_url = if page == 1 {
                listing_url.to_string()
            } else {
                format!("{listing_url}page-{page}")
            };

            let html = match fetcher.get_text(&page_url).await {
                Ok(html) => html,
                Err(cause) => {
                    if page == 1 {
                        return Err(CrawlError::Listing {
                            site: SOURCE,
                            category: category.to_string(),
                            cause,
                        });
                    }
                    warn!(%page_url, error = %cause, "Listing page fetch failed; keeping collected items");
                    break;
                }
            };

            let entries = parse_listing(&html, &self.config.host);
            if entries.is_empty() {
                // End of forum pagination
                break;
            }

            for (title, link) in entries {
                if picked.len() >= limit {
                    break;
                }
                if !seen.insert(link.clone()) {
                    continue;
                }
                let id = id_from_link(&link);
                picked.push(PendingThread { id, title, link });
            }

            page += 1;
        }
        debug!(
            candidates = picked.len(),
            "Collected listing entries; fetching threads"
        );

        let host = self.config.host.as_str();
        let articles: Vec<Article> = stream::iter(picked)
            .then(|thread| async move {
                let (content, image) = match fetch_thread_body(fetcher, &thread.link, host).await {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!(link = %thread.link, error = %e, "Thread fetch failed; emitting placeholder");
                        (FETCH_FAILED_BODY.to_string(), None)
                    }
                };
                debug!(link = %thread.link, chars = content.len(), "Fetched thread body");
                Article {
                    id: thread.id,
                    title: thread.title,
                    content,
                    image,
                    link: thread.link,
                    timestamp: models::local_timestamp(),
                    source: SOURCE.to_string(),
                    category: category.to_string(),
                }
            })
            .collect()
            .await;

        info!(count = articles.len(), %category, "Otofun crawl finished");
        Ok(articles)
    }
}

/// Thread entries on a listing page: `(title, absolute link)` pairs in page
/// order. Entries without a thread anchor are skipped.
fn parse_listing(html: &str, host: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);
    document
        .select(&THREAD_TITLE)
        .filter_map(|item| {
            let anchor = item.select(&THREAD_ANCHOR).next()?;
            let href = anchor.value().attr("href")?;
            let title = anchor.text().collect::<Vec<_>>().join(" ").trim().to_string();
            Some((title, format!("{host}{href}")))
        })
        .collect()
}

async fn fetch_thread_body<F: Fetch>(
    fetcher: &F,
    url: &str,
    host: &str,
) -> Result<(String, Option<String>), FetchError> {
    let html = fetcher.get_text(url).await?;
    Ok(extract_first_post(&html, host))
}

/// Body text and first image of the opening post. A thread without the
/// expected post structure degrades to a placeholder body and no image.
fn extract_first_post(html: &str, host: &str) -> (String, Option<String>) {
    let document = Html::parse_document(html);
    if let Some(post) = document.select(&FIRST_POST).next() {
        if let Some(body) = post.select(&POST_BODY).next() {
            let image = body
                .select(&POST_IMAGE)
                .next()
                .and_then(|img| img.value().attr("src"))
                .map(|src| absolutize(src, host));
            let content = body.text().collect::<Vec<_>>().join(" ").trim().to_string();
            return (content, image);
        }
    }
    (MISSING_BODY.to_string(), None)
}

fn absolutize(src: &str, host: &str) -> String {
    if src.starts_with("http") {
        src.to_string()
    } else {
        format!("{host}{src}")
    }
}

/// Trailing `.<digits>` segment of a thread path, e.g.
/// `/threads/mua-xe-gi.6789/` gives `6789`. Links without one get a hashed
/// `otf_` id.
fn id_from_link(link: &str) -> String {
    THREAD_ID
        .captures(link)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| models::fallback_id("otf_", link))
}
