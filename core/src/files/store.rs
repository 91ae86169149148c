//! Async transport seam to the file-storage collaborator.
//!
//! The controller never talks HTTP directly; it holds an
//! `Arc<dyn FileStore>` injected at construction.
//! [`HttpFileStore`](super::HttpFileStore) is the production implementation;
//! tests swap in mocks or scripted fakes.

use serde::Serialize;

use crate::errors::StoreError;
use crate::files::UploadFile;

/// Any HTTP response that was actually received.
///
/// Receiving a response is transport success regardless of `status`; the
/// caller decides what a non-2xx status means for its operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl StoreResponse {
    /// A plain-text response with the given status.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("text/plain".to_string()),
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Operations the controller consumes from the file store.
///
/// Every method returns `Err` only for network-level failure (no response
/// received). A received response of any status is `Ok`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FileStore: Send + Sync {
    /// Read the directory listing.
    async fn list(&self) -> Result<StoreResponse, StoreError>;

    /// Send one file as a single-field multipart form.
    async fn upload(&self, file: &UploadFile) -> Result<StoreResponse, StoreError>;

    /// Delete a file by its raw (unencoded) name.
    async fn delete(&self, name: &str) -> Result<StoreResponse, StoreError>;

    /// Download the file at a listing `href`.
    ///
    /// Returns the status and the raw body bytes.
    async fn fetch(&self, href: &str) -> Result<(u16, Vec<u8>), StoreError>;
}
