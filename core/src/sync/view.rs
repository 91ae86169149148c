//! View state published by the sync controller.

use serde::Serialize;

use crate::files::{DirectoryListing, FileEntry};
use crate::status::StatusSlot;

/// Listing sub-state of the view.
///
/// `Available` with no entries (store reachable, nothing stored) and
/// `Unavailable` (listing could not be fetched) render differently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "entries")]
pub enum ListingView {
    #[default]
    Idle,
    Loading,
    Available(DirectoryListing),
    Unavailable,
}

/// Placeholder row shown when no real entries can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Sentinel {
    Loading,
    NoFiles,
    Unavailable,
}

impl Sentinel {
    pub fn label(self) -> &'static str {
        match self {
            Sentinel::Loading => "Loading…",
            Sentinel::NoFiles => "No files found",
            Sentinel::Unavailable => "Directory listing not available",
        }
    }
}

/// One rendered row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ListingRow {
    Entry(FileEntry),
    Sentinel { sentinel: Sentinel },
}

impl ListingView {
    /// Rows to render. Every state except `Idle` yields at least one row.
    pub fn rows(&self) -> Vec<ListingRow> {
        match self {
            ListingView::Idle => Vec::new(),
            ListingView::Loading => vec![sentinel(Sentinel::Loading)],
            ListingView::Unavailable => vec![sentinel(Sentinel::Unavailable)],
            ListingView::Available(listing) if listing.is_empty() => {
                vec![sentinel(Sentinel::NoFiles)]
            }
            ListingView::Available(listing) => {
                listing.iter().cloned().map(ListingRow::Entry).collect()
            }
        }
    }

    /// The rendered listing, if one is currently shown.
    pub fn listing(&self) -> Option<&DirectoryListing> {
        match self {
            ListingView::Available(listing) => Some(listing),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListingView::Loading)
    }
}

fn sentinel(sentinel: Sentinel) -> ListingRow {
    ListingRow::Sentinel { sentinel }
}

/// Everything the view binder renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub listing: ListingView,
    pub status: StatusSlot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_renders_nothing() {
        assert!(ListingView::Idle.rows().is_empty());
    }

    #[test]
    fn loading_renders_placeholder() {
        assert_eq!(
            ListingView::Loading.rows(),
            vec![ListingRow::Sentinel {
                sentinel: Sentinel::Loading
            }]
        );
    }

    #[test]
    fn empty_and_unavailable_render_different_sentinels() {
        let empty = ListingView::Available(DirectoryListing::default()).rows();
        let unavailable = ListingView::Unavailable.rows();
        assert_eq!(empty.len(), 1);
        assert_eq!(unavailable.len(), 1);
        assert_ne!(empty, unavailable);
        assert_eq!(
            empty[0],
            ListingRow::Sentinel {
                sentinel: Sentinel::NoFiles
            }
        );
        assert_eq!(Sentinel::Unavailable.label(), "Directory listing not available");
    }

    #[test]
    fn entries_render_in_order() {
        let listing = DirectoryListing::new(vec![
            FileEntry::from_href("/uploads/b"),
            FileEntry::from_href("/uploads/a"),
        ]);
        let rows = ListingView::Available(listing).rows();
        assert_eq!(
            rows,
            vec![
                ListingRow::Entry(FileEntry::from_href("/uploads/b")),
                ListingRow::Entry(FileEntry::from_href("/uploads/a")),
            ]
        );
    }

    #[test]
    fn view_state_json_shape() {
        let state = ViewState {
            listing: ListingView::Available(DirectoryListing::new(vec![FileEntry::from_href(
                "/uploads/x",
            )])),
            status: StatusSlot::default(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "listing": {"state": "available", "entries": [{"name": "x", "href": "/uploads/x"}]},
                "status": null
            })
        );

        let json = serde_json::to_value(ListingView::Unavailable).unwrap();
        assert_eq!(json, serde_json::json!({"state": "unavailable"}));
    }
}
