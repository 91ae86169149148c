//! Client-side synchronization controller.
//!
//! [`SyncController`] reconciles the store's directory state with the view
//! and with user actions. It is the only writer of [`ViewState`]; binders
//! read it through a `watch` receiver and forward gestures back as method
//! calls.
//!
//! # Sequencing
//!
//! - `refresh`: `Loading` → `list()` → `Available` or `Unavailable`.
//! - `upload` / `delete`: call the store, report the body, then refresh.
//!   A refresh only follows a received response; network failure reports an
//!   error and leaves the listing as it was.
//!
//! Overlapping actions are not coordinated. Requests carry no generation
//! token, so a slow refresh that finishes last wins even if its data is
//! older than a newer refresh's.

pub mod view;

pub use view::{ListingRow, ListingView, Sentinel, ViewState};

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::errors::StoreError;
use crate::files::{parse_listing_as, FileStore, ListingFormat, UploadFile};
use crate::status::StatusMessage;

/// Interactive yes/no confirmation, injected by the binder.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmation that always answers yes.
pub struct AutoConfirm;

#[async_trait::async_trait]
impl Confirm for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Orchestrates refresh, upload, delete and download against a [`FileStore`].
pub struct SyncController {
    store: Arc<dyn FileStore>,
    confirm: Arc<dyn Confirm>,
    state: watch::Sender<ViewState>,
}

impl SyncController {
    pub fn new(store: Arc<dyn FileStore>, confirm: Arc<dyn Confirm>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            store,
            confirm,
            state,
        }
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Copy of the current view state.
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Re-read the listing from the store and render it.
    pub async fn refresh(&self) {
        self.set_listing(ListingView::Loading);

        let result = match self.store.list().await {
            Ok(resp) if resp.is_success() => Ok(resp),
            Ok(resp) => Err(StoreError::ListingUnavailable {
                status: resp.status,
            }),
            Err(e) => Err(e),
        };

        match result {
            Ok(resp) => {
                let format = ListingFormat::from_content_type(resp.content_type.as_deref());
                let listing = parse_listing_as(&resp.body, format);
                debug!("Listing refreshed: {} entries", listing.len());
                self.set_listing(ListingView::Available(listing));
            }
            Err(e) => {
                warn!("Listing fetch failed: {e}");
                self.set_listing(ListingView::Unavailable);
                self.report(StatusMessage::error(format!("Could not fetch uploads: {e}")));
            }
        }
    }

    /// Upload one file, then refresh if the store answered at all.
    ///
    /// The response body is shown as-is and is not flagged as an error even
    /// for a non-2xx status.
    pub async fn upload(&self, file: UploadFile) {
        self.report(StatusMessage::info(format!("Uploading {}…", file.name)));

        match self.store.upload(&file).await {
            Ok(resp) => {
                info!("Upload of {} answered with HTTP {}", file.name, resp.status);
                self.report(StatusMessage::info(format!("Upload response: {}", resp.body)));
                self.refresh().await;
            }
            Err(e) => {
                warn!("Upload of {} failed: {e}", file.name);
                self.report(StatusMessage::error(format!("Upload failed: {e}")));
            }
        }
    }

    /// Delete a file by name after confirmation, then refresh if the store
    /// answered at all. A declined confirmation changes nothing.
    pub async fn delete(&self, name: &str) {
        if !self.confirm.confirm(&format!("Delete \"{name}\"?")).await {
            debug!("Delete of {name} declined");
            return;
        }

        self.report(StatusMessage::info(format!("Deleting {name}…")));

        match self.store.delete(name).await {
            Ok(resp) => {
                info!("Delete of {name} answered with HTTP {}", resp.status);
                self.report(StatusMessage::info(format!("Delete response: {}", resp.body)));
                self.refresh().await;
            }
            Err(e) => {
                warn!("Delete of {name} failed: {e}");
                self.report(StatusMessage::error(format!("Delete failed: {e}")));
            }
        }
    }

    /// Download a file shown in the current listing.
    ///
    /// Returns the bytes on a 2xx response. Never triggers a refresh.
    pub async fn download(&self, name: &str) -> Option<Vec<u8>> {
        let href = self
            .state
            .borrow()
            .listing
            .listing()
            .and_then(|l| l.find(name))
            .map(|e| e.href.clone());
        let Some(href) = href else {
            self.report(StatusMessage::error(format!("No such file: {name}")));
            return None;
        };

        match self.store.fetch(&href).await {
            Ok((status, bytes)) if (200..300).contains(&status) => {
                info!("Downloaded {name} ({} bytes)", bytes.len());
                self.report(StatusMessage::info(format!(
                    "Downloaded {name} ({} bytes)",
                    bytes.len()
                )));
                Some(bytes)
            }
            Ok((status, _)) => {
                warn!("Download of {name} answered with HTTP {status}");
                self.report(StatusMessage::error(format!(
                    "Download failed: HTTP {status}"
                )));
                None
            }
            Err(e) => {
                warn!("Download of {name} failed: {e}");
                self.report(StatusMessage::error(format!("Download failed: {e}")));
                None
            }
        }
    }

    /// Overwrite the status line.
    pub fn report(&self, message: StatusMessage) {
        debug!("Status: {}", message.text);
        self.state.send_modify(|s| s.status.set(message));
    }

    fn set_listing(&self, listing: ListingView) {
        self.state.send_modify(|s| s.listing = listing);
    }
}
