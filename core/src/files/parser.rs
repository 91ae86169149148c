//! Listing response parsing.
//!
//! The listing endpoint answers with an HTML page of anchors, one per file.
//! Parsing is tolerant: malformed markup never fails, it simply yields the
//! anchors that could be found, possibly none. A structured JSON listing
//! (`[{"name": ..., "href": ...}]`) is accepted as well when the store sends
//! one.

use scraper::{ElementRef, Html};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{utils, DirectoryListing, FileEntry};

/// Wire format of a listing response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    Html,
    Json,
}

impl ListingFormat {
    /// Pick the format from a `Content-Type` header value.
    ///
    /// Anything that is not `application/json` is scraped as HTML.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase());
        match mime.as_deref() {
            Some("application/json") => ListingFormat::Json,
            _ => ListingFormat::Html,
        }
    }
}

#[derive(Deserialize)]
struct ListingRecord {
    #[serde(default)]
    name: Option<String>,
    href: String,
}

/// Parse an HTML listing body into entries, in document order.
pub fn parse_listing(raw: &str) -> DirectoryListing {
    let fragment = Html::parse_fragment(raw);
    let listing: DirectoryListing = fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "a")
        .map(entry_from_anchor)
        .collect();
    debug!("Parsed {} anchors from listing", listing.len());
    listing
}

/// Parse a listing body in the given format.
///
/// A JSON body that does not deserialize into records falls back to anchor
/// scraping.
pub fn parse_listing_as(raw: &str, format: ListingFormat) -> DirectoryListing {
    match format {
        ListingFormat::Html => parse_listing(raw),
        ListingFormat::Json => match serde_json::from_str::<Vec<ListingRecord>>(raw) {
            Ok(records) => records.into_iter().map(entry_from_record).collect(),
            Err(e) => {
                warn!("JSON listing did not parse ({e}), scraping anchors instead");
                parse_listing(raw)
            }
        },
    }
}

/// `href` attribute, or the anchor text when the attribute is missing or empty.
fn entry_from_anchor(anchor: ElementRef<'_>) -> FileEntry {
    let href = match anchor.value().attr("href") {
        Some(href) if !href.is_empty() => href.to_string(),
        _ => anchor.text().collect::<String>(),
    };
    FileEntry::from_href(href)
}

fn entry_from_record(record: ListingRecord) -> FileEntry {
    let name = record
        .name
        .unwrap_or_else(|| utils::last_segment(&record.href).to_string());
    FileEntry {
        name,
        href: record.href,
    }
}
