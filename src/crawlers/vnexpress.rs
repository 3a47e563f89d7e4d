//! VnExpress feed crawler.
//!
//! Listings come from the per-category RSS feeds at
//! `https://vnexpress.net/rss/<slug>.rss`. Feed metadata supplies the title,
//! link, publish date, and a thumbnail embedded in the description HTML; the
//! full body text requires one secondary fetch into the article page, where
//! it lives in the `fck_detail` container as `p.Normal` paragraphs.
//!
//! Video entries carry no extractable article text and are filtered out by
//! link substring.

use crate::config::FeedConfig;
use crate::error::{CrawlError, FetchError};
use crate::fetch::Fetch;
use crate::models::{self, Article};
use crate::rss;
use chrono::{DateTime, Local};
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

const SOURCE: &str = "VnExpress";

static ARTICLE_DETAIL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.fck_detail").unwrap());
static DIV_DETAIL: Lazy<Selector> = Lazy::new(|| Selector::parse("div.fck_detail").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p.Normal").unwrap());
static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name=\"description\"]").unwrap());
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static TRAILING_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)(?:\.html)?$").unwrap());

/// A feed entry that passed filtering, waiting for its body fetch.
struct PendingArticle {
    id: String,
    title: String,
    link: String,
    image: Option<String>,
    timestamp: String,
}

/// Stateless crawler over the VnExpress RSS feeds.
pub struct VnExpressCrawler<'a> {
    config: &'a FeedConfig,
}

impl<'a> VnExpressCrawler<'a> {
    pub fn new(config: &'a FeedConfig) -> Self {
        Self { config }
    }

    /// Crawl one category feed, returning at most `limit` articles in feed
    /// order.
    ///
    /// Unknown categories resolve to the default slug. A failed feed fetch
    /// or parse fails the whole category; a failed body fetch only empties
    /// that article's content.
    #[instrument(level = "info", skip(self, fetcher))]
    pub async fn crawl<F: Fetch>(
        &self,
        fetcher: &F,
        category: &str,
        limit: usize,
    ) -> Result<Vec<Article>, CrawlError> {
        let slug = self.config.slug_for(category);
        let feed_url = self.config.feed_url(slug);
        info!(%slug, %feed_url, "Crawling VnExpress feed");

        let xml = fetcher.get_text(&feed_url).await.map_err(|cause| {
            CrawlError::Listing {
                site: SOURCE,
                category: slug.to_string(),
                cause,
            }
        })?;
        let items = rss::parse_items(&xml).map_err(|cause| CrawlError::Listing {
            site: SOURCE,
            category: slug.to_string(),
            cause,
        })?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut picked: Vec<PendingArticle> = Vec::new();
        for item in items {
            if picked.len() >= limit {
                break;
            }

            let link = item.link.trim().to_string();
            let title = item.title.trim().to_string();

            // Skip duplicates and video entries
            if seen.contains(&link) || link.to_lowercase().contains("video") {
                continue;
            }
            seen.insert(link.clone());

            let image = image_from_description(&item.description);
            let timestamp = parse_feed_date(&item.pub_date);
            let id = id_from_link(&link);

            picked.push(PendingArticle {
                id,
                title,
                link,
                image,
                timestamp,
            });
        }
        debug!(
            candidates = picked.len(),
            "Collected feed entries; fetching bodies"
        );

        // One secondary fetch per entry, sequential to keep a single
        // outbound connection to the site.
        let articles: Vec<Article> = stream::iter(picked)
            .then(|entry| async move {
                let content = match fetch_article_body(fetcher, &entry.link).await {
                    Ok(body) => body,
                    Err(e) => {
                        warn!(link = %entry.link, error = %e, "Body fetch failed; emitting empty content");
                        String::new()
                    }
                };
                debug!(link = %entry.link, chars = content.len(), "Fetched article body");
                Article {
                    id: entry.id,
                    title: entry.title,
                    content,
                    image: entry.image,
                    link: entry.link,
                    timestamp: entry.timestamp,
                    source: SOURCE.to_string(),
                    category: slug.to_string(),
                }
            })
            .collect()
            .await;

        info!(count = articles.len(), %slug, "VnExpress crawl finished");
        Ok(articles)
    }
}

async fn fetch_article_body<F: Fetch>(fetcher: &F, url: &str) -> Result<String, FetchError> {
    let html = fetcher.get_text(url).await?;
    Ok(extract_body(&html))
}

/// Body text from an article page: every `p.Normal` inside the `fck_detail`
/// container, joined with blank lines. Falls back to the page's meta
/// description when the container is missing.
fn extract_body(html: &str) -> String {
    let document = Html::parse_document(html);
    let container = document
        .select(&ARTICLE_DETAIL)
        .next()
        .or_else(|| document.select(&DIV_DETAIL).next());
    match container {
        Some(container) => container
            .select(&PARAGRAPH)
            .map(|p| p.text().collect::<Vec<_>>().join(" ").trim().to_string())
            .collect::<Vec<_>>()
            .join("\n\n")
            .trim()
            .to_string(),
        None => document
            .select(&META_DESCRIPTION)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .unwrap_or_default()
            .to_string(),
    }
}

/// First `<img>` `src` inside the item's description fragment, if any.
fn image_from_description(description: &str) -> Option<String> {
    let fragment = Html::parse_fragment(description);
    fragment
        .select(&IMG)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::to_string)
}

/// Feed dates use the de facto RSS layout (RFC 2822). Unparseable dates
/// fall back to crawl time; both paths normalize to the local layout.
fn parse_feed_date(raw: &str) -> String {
    match DateTime::parse_from_rfc2822(raw) {
        Ok(parsed) => parsed
            .with_timezone(&Local)
            .format(models::TIMESTAMP_FORMAT)
            .to_string(),
        Err(_) => models::local_timestamp(),
    }
}

/// Trailing numeric token of the link, e.g. `.../bao-so-3-4812345.html`
/// gives `4812345`. Links without one get a hashed `vne_` id.
fn id_from_link(link: &str) -> String {
    TRAILING_ID
        .captures(link)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| models::fallback_id("vne_", link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Serves canned bodies by exact URL; everything else is a 404.
    struct MapFetcher {
        pages: HashMap<String, String>,
    }

    impl MapFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
            }
        }
    }

    impl Fetch for MapFetcher {
        async fn get_text(&self, url: &str) -> Result<String, FetchError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: reqwest::StatusCode::NOT_FOUND,
                })
        }
    }

    fn feed(items: &str) -> String {
        format!("<rss><channel><title>VnExpress RSS</title>{items}</channel></rss>")
    }

    fn feed_item(title: &str, link: &str) -> String {
        format!("<item><title>{title}</title><link>{link}</link></item>")
    }

    const THOI_SU_FEED: &str = "https://vnexpress.net/rss/thoi-su.rss";

    #[tokio::test]
    async fn test_duplicate_links_collapse_to_first_occurrence() {
        let items = format!(
            "{}{}",
            feed_item("A", "https://x/a-123.html"),
            feed_item("A-dup", "https://x/a-123.html"),
        );
        let fetcher = MapFetcher::new(&[(THOI_SU_FEED, feed(&items).as_str())]);
        let config = FeedConfig::default();
        let crawler = VnExpressCrawler::new(&config);

        let articles = crawler.crawl(&fetcher, "thoi-su", 10).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].id, "123");
        assert_eq!(articles[0].title, "A");
        assert_eq!(articles[0].link, "https://x/a-123.html");
    }

    #[tokio::test]
    async fn test_video_links_are_excluded() {
        let items = format!(
            "{}{}{}",
            feed_item("Normal", "https://vnexpress.net/tin-100.html"),
            feed_item("Clip", "https://VIDEO.vnexpress.net/clip-101.html"),
            feed_item("Clip 2", "https://vnexpress.net/video/clip-102.html"),
        );
        let fetcher = MapFetcher::new(&[(THOI_SU_FEED, feed(&items).as_str())]);
        let config = FeedConfig::default();
        let crawler = VnExpressCrawler::new(&config);

        let articles = crawler.crawl(&fetcher, "thoi-su", 10).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Normal");
    }

    #[tokio::test]
    async fn test_limit_is_respected_in_feed_order() {
        let items: String = (0..5)
            .map(|i| feed_item(&format!("T{i}"), &format!("https://x/t-{i}00.html")))
            .collect();
        let fetcher = MapFetcher::new(&[(THOI_SU_FEED, feed(&items).as_str())]);
        let config = FeedConfig::default();
        let crawler = VnExpressCrawler::new(&config);

        let articles = crawler.crawl(&fetcher, "thoi-su", 2).await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "T0");
        assert_eq!(articles[1].title, "T1");
    }

    #[tokio::test]
    async fn test_unknown_category_crawls_the_default_feed() {
        let items = feed_item("Default news", "https://x/n-7.html");
        let fetcher = MapFetcher::new(&[(THOI_SU_FEED, feed(&items).as_str())]);
        let config = FeedConfig::default();
        let crawler = VnExpressCrawler::new(&config);

        let articles = crawler
            .crawl(&fetcher, "nonexistent-category", 5)
            .await
            .unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].category, "thoi-su");
    }

    #[tokio::test]
    async fn test_failed_body_fetches_still_emit_articles() {
        // Only the feed URL resolves; every detail fetch 404s.
        let items = format!(
            "{}{}",
            feed_item("A", "https://x/a-1.html"),
            feed_item("B", "https://x/b-2.html"),
        );
        let fetcher = MapFetcher::new(&[(THOI_SU_FEED, feed(&items).as_str())]);
        let config = FeedConfig::default();
        let crawler = VnExpressCrawler::new(&config);

        let articles = crawler.crawl(&fetcher, "thoi-su", 10).await.unwrap();
        assert_eq!(articles.len(), 2);
        for article in &articles {
            assert_eq!(article.content, "");
        }
    }

    #[tokio::test]
    async fn test_feed_fetch_failure_is_a_category_error() {
        let fetcher = MapFetcher::new(&[]);
        let config = FeedConfig::default();
        let crawler = VnExpressCrawler::new(&config);

        let result = crawler.crawl(&fetcher, "thoi-su", 10).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_body_extracted_from_detail_page() {
        let detail = r#"<html><body>
            <article class="fck_detail">
              <p class="Normal">Đoạn một.</p>
              <p class="Normal">Đoạn hai.</p>
              <p class="caption">Chú thích ảnh bị bỏ qua.</p>
            </article>
        </body></html>"#;
        let items = feed_item("A", "https://vnexpress.net/a-9.html");
        let feed_body = feed(&items);
        let fetcher = MapFetcher::new(&[
            (THOI_SU_FEED, feed_body.as_str()),
            ("https://vnexpress.net/a-9.html", detail),
        ]);
        let config = FeedConfig::default();
        let crawler = VnExpressCrawler::new(&config);

        let articles = crawler.crawl(&fetcher, "thoi-su", 10).await.unwrap();
        assert_eq!(articles[0].content, "Đoạn một.\n\nĐoạn hai.");
    }

    #[test]
    fn test_extract_body_div_fallback_container() {
        let html = r#"<div class="fck_detail"><p class="Normal">Nội dung.</p></div>"#;
        assert_eq!(extract_body(html), "Nội dung.");
    }

    #[test]
    fn test_extract_body_meta_description_fallback() {
        let html = r#"<html><head>
            <meta name="description" content="Tóm tắt bài viết.">
        </head><body><p>no container here</p></body></html>"#;
        assert_eq!(extract_body(html), "Tóm tắt bài viết.");
    }

    #[test]
    fn test_extract_body_empty_page() {
        assert_eq!(extract_body("<html><body></body></html>"), "");
    }

    #[test]
    fn test_image_from_description() {
        let description =
            r#"<a href="https://x/a.html"><img src="https://i1.vnecdn.net/thumb.jpg"></a>Tóm tắt"#;
        assert_eq!(
            image_from_description(description),
            Some("https://i1.vnecdn.net/thumb.jpg".to_string())
        );
        assert_eq!(image_from_description("plain text only"), None);
    }

    #[test]
    fn test_parse_feed_date_normalizes_to_local() {
        let raw = "Sat, 01 Aug 2026 08:30:00 +0700";
        let expected = DateTime::parse_from_rfc2822(raw)
            .unwrap()
            .with_timezone(&Local)
            .format(models::TIMESTAMP_FORMAT)
            .to_string();
        assert_eq!(parse_feed_date(raw), expected);
    }

    #[test]
    fn test_parse_feed_date_fallback_shape() {
        let ts = parse_feed_date("not a date");
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[10..11], "T");
    }

    #[test]
    fn test_id_from_link() {
        assert_eq!(id_from_link("https://x/a-123.html"), "123");
        assert_eq!(id_from_link("https://x/p/4812345"), "4812345");
        let fallback = id_from_link("https://x/no-numeric-token");
        assert!(fallback.starts_with("vne_"));
        // Deterministic across calls
        assert_eq!(fallback, id_from_link("https://x/no-numeric-token"));
    }
}
