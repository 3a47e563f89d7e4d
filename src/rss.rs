//! Minimal RSS item extraction.
//!
//! VnExpress feeds are plain RSS 2.0. Only the four per-item fields the
//! crawler consumes are pulled out: `title`, `link`, `description`, and
//! `pubDate`. Descriptions arrive as CDATA-wrapped HTML and are returned
//! verbatim for the caller to parse as a fragment.

use crate::error::FetchError;
use quick_xml::Reader;
use quick_xml::events::Event;

/// One `<item>` from an RSS document, fields as they appeared in the feed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Raw description payload, usually an HTML fragment.
    pub description: String,
    /// Publish date as written in the feed, typically RFC 2822.
    pub pub_date: String,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Link,
    Description,
    PubDate,
}

/// Extract all `<item>` entries from an RSS document, in document order.
///
/// Channel-level `<title>`/`<link>` elements outside an item are ignored.
/// A malformed document fails the whole feed with [`FetchError::Xml`];
/// the caller treats that the same as a failed fetch.
pub fn parse_items(xml: &str) -> Result<Vec<FeedItem>, FetchError> {
    let mut reader = Reader::from_str(xml);

    let mut items = Vec::new();
    let mut current: Option<FeedItem> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                field = match e.name().as_ref() {
                    b"item" => {
                        current = Some(FeedItem::default());
                        None
                    }
                    b"title" => Some(Field::Title),
                    b"link" => Some(Field::Link),
                    b"description" => Some(Field::Description),
                    b"pubDate" => Some(Field::PubDate),
                    _ => None,
                };
            }
            Event::End(e) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
                field = None;
            }
            Event::Text(e) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let decoded = e.decode().unwrap_or_default();
                    let text = quick_xml::escape::unescape(&decoded).unwrap_or_default();
                    push_field(item, field, &text);
                }
            }
            Event::CData(e) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let text = String::from_utf8_lossy(e.into_inner().as_ref()).into_owned();
                    push_field(item, field, &text);
                }
            }
            Event::GeneralRef(e) => {
                if let (Some(item), Some(field)) = (current.as_mut(), field) {
                    let name = e.decode().unwrap_or_default();
                    let escaped = format!("&{name};");
                    let text = quick_xml::escape::unescape(&escaped).unwrap_or_default();
                    push_field(item, field, &text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}

fn push_field(item: &mut FeedItem, field: Field, text: &str) {
    let target = match field {
        Field::Title => &mut item.title,
        Field::Link => &mut item.link,
        Field::Description => &mut item.description,
        Field::PubDate => &mut item.pub_date,
    };
    target.push_str(text);
}
