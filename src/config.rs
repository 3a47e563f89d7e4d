//! Compiled-in crawl configuration.
//!
//! The category tables, item limits, and fetch settings mirror what the
//! target sites actually offer and are not meant to be externally
//! configurable at runtime. They live in a plain read-only struct built once
//! at startup and passed by reference into the crawlers, so there is no
//! hidden global state.

use std::collections::HashMap;
use std::time::Duration;

/// Desktop-browser user agent sent with every request. Both sites serve the
/// full static markup to this agent.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Connect/read timeout for every fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Top-level configuration shared by the orchestrator and both crawlers.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// User agent string for all outbound requests.
    pub user_agent: String,
    /// Connect/read timeout for all outbound requests.
    pub timeout: Duration,
    /// VnExpress feed crawler settings.
    pub vnexpress: FeedConfig,
    /// Otofun forum crawler settings.
    pub otofun: ForumConfig,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            timeout: FETCH_TIMEOUT,
            vnexpress: FeedConfig::default(),
            otofun: ForumConfig::default(),
        }
    }
}

/// Settings for the RSS feed crawler.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the RSS endpoint, without trailing slash.
    pub feed_base: String,
    /// Category key to feed slug. Keys and slugs coincide for VnExpress but
    /// the table keeps the mapping explicit.
    pub slugs: HashMap<String, String>,
    /// Slug used when a requested category is not in the table.
    pub default_slug: String,
    /// Categories the orchestrator crawls, in order.
    pub categories: Vec<String>,
    /// Per-category item limit.
    pub limit: usize,
}

impl FeedConfig {
    /// Resolve a category key to its feed slug, falling back to the default
    /// slug for unknown categories. Unknown categories never fail a crawl.
    pub fn slug_for(&self, category: &str) -> &str {
        self.slugs
            .get(category)
            .map(String::as_str)
            .unwrap_or(&self.default_slug)
    }

    /// Full URL of the feed for a resolved slug.
    pub fn feed_url(&self, slug: &str) -> String {
        format!("{}/{}.rss", self.feed_base, slug)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        let slugs = [
            "thoi-su",
            "kinh-doanh",
            "giai-tri",
            "the-thao",
            "phap-luat",
            "giao-duc",
            "suc-khoe",
            "doi-song",
            "du-lich",
            "khoa-hoc",
            "so-hoa",
            "oto-xe-may",
        ];
        Self {
            feed_base: "https://vnexpress.net/rss".to_string(),
            slugs: slugs
                .iter()
                .map(|s| (s.to_string(), s.to_string()))
                .collect(),
            default_slug: "thoi-su".to_string(),
            categories: slugs.iter().map(|s| s.to_string()).collect(),
            limit: 30,
        }
    }
}

/// Settings for the forum pagination crawler.
#[derive(Debug, Clone)]
pub struct ForumConfig {
    /// Site host, used to absolutize relative thread and image URLs.
    pub host: String,
    /// Category key to listing URL. Listing URLs end with a trailing slash
    /// so page suffixes can be appended directly.
    pub listings: HashMap<String, String>,
    /// Category used when a requested category is not in the table.
    pub default_category: String,
    /// Categories the orchestrator crawls, in order.
    pub categories: Vec<String>,
    /// Per-category item limit.
    pub limit: usize,
    /// Hard ceiling on listing pages fetched per crawl call. Bounds
    /// worst-case crawl time against an empty or pathological section.
    pub max_pages: usize,
}

impl ForumConfig {
    /// Resolve a category key to its listing URL, falling back to the
    /// default category's URL for unknown keys.
    pub fn listing_for(&self, category: &str) -> &str {
        self.listings
            .get(category)
            .or_else(|| self.listings.get(&self.default_category))
            .map(String::as_str)
            .expect("default forum category is always present")
    }
}

impl Default for ForumConfig {
    fn default() -> Self {
        let listings: HashMap<String, String> = [
            ("oto-xe-may", "https://www.otofun.net/forums/oto-xe-may.2/"),
            ("kinh-doanh", "https://www.otofun.net/forums/tttm-xe-co.292/"),
            ("du-lich", "https://www.otofun.net/forums/cac-chuyen-di.24/"),
            ("doi-song", "https://www.otofun.net/forums/cafe-otofun.16/"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            host: "https://www.otofun.net".to_string(),
            listings,
            default_category: "doi-song".to_string(),
            categories: ["oto-xe-may", "kinh-doanh", "du-lich", "doi-song"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            limit: 10,
            max_pages: 3,
        }
    }
}
