//! The normalized article record both crawlers produce.
//!
//! An [`Article`] is built once per successfully parsed listing entry, after
//! its detail fetch resolved (successfully or with a fallback body), and
//! handed to the storage collaborator. `content` and `image` always carry
//! safe values: an empty or placeholder string and `None` respectively, so
//! downstream consumers never deal with absent fields.

use chrono::Local;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Local timestamp layout used for every article, parsed or defaulted.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A crawled news article or forum thread, normalized across sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier derived from the link: the trailing numeric token
    /// when present, otherwise a source-tagged hash of the full link.
    pub id: String,
    /// Headline or thread title, trimmed.
    pub title: String,
    /// Full extracted body text. May be empty or a placeholder sentence
    /// when extraction failed; never absent.
    pub content: String,
    /// Absolute URL of a representative image, if one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Canonical absolute URL of the article or thread. Dedup key within a
    /// crawl call and the basis of `id`.
    pub link: String,
    /// Local time in [`TIMESTAMP_FORMAT`], from feed metadata or crawl time.
    pub timestamp: String,
    /// Site identifier, e.g. `"VnExpress"` or `"Otofun"`.
    pub source: String,
    /// Category slug the article was crawled under.
    pub category: String,
}

/// Source-tagged fallback identifier for links without a numeric token.
///
/// The digest keeps the id deterministic across runs and the prefix keeps
/// ids from different sources distinguishable even for malformed links.
pub fn fallback_id(prefix: &str, link: &str) -> String {
    let digest = Sha256::digest(link.as_bytes());
    format!("{}{}", prefix, &hex::encode(digest)[..8])
}

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn local_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article() -> Article {
        Article {
            id: "4812345".to_string(),
            title: "Bão số 3 đổ bộ miền Trung".to_string(),
            content: "Bão mạnh cấp 12.".to_string(),
            image: None,
            link: "https://vnexpress.net/bao-so-3-4812345.html".to_string(),
            timestamp: "2026-08-01T08:30:00".to_string(),
            source: "VnExpress".to_string(),
            category: "thoi-su".to_string(),
        }
    }

    #[test]
    fn test_article_serialization_roundtrip() {
        let article = sample_article();
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }

    #[test]
    fn test_absent_image_is_omitted_from_json() {
        let json = serde_json::to_string(&sample_article()).unwrap();
        assert!(!json.contains("\"image\""));
    }

    #[test]
    fn test_present_image_is_serialized() {
        let mut article = sample_article();
        article.image = Some("https://i1-vnexpress.vnecdn.net/bao.jpg".to_string());
        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains("bao.jpg"));
    }

    #[test]
    fn test_fallback_id_is_deterministic() {
        let a = fallback_id("vne_", "https://vnexpress.net/some-page");
        let b = fallback_id("vne_", "https://vnexpress.net/some-page");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_id_distinguishes_sources_and_links() {
        let link = "https://example.com/page";
        assert_ne!(fallback_id("vne_", link), fallback_id("otf_", link));
        assert_ne!(
            fallback_id("vne_", "https://example.com/a"),
            fallback_id("vne_", "https://example.com/b")
        );
    }

    #[test]
    fn test_fallback_id_shape() {
        let id = fallback_id("otf_", "https://www.otofun.net/threads/some-thread/");
        assert!(id.starts_with("otf_"));
        assert_eq!(id.len(), "otf_".len() + 8);
    }

    #[test]
    fn test_local_timestamp_shape() {
        let ts = local_timestamp();
        // YYYY-MM-DDTHH:MM:SS
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
    }
}
