pub mod http;
pub mod parser;
pub mod store;
pub mod utils;

pub use http::HttpFileStore;
pub use parser::{parse_listing, parse_listing_as, ListingFormat};
pub use store::{FileStore, StoreResponse};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A file held by the remote store, as reported by the listing endpoint.
///
/// `name` is the last `/`-segment of `href`. Names are not checked for
/// uniqueness; that is the store's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub href: String,
}

impl FileEntry {
    /// Build an entry from a retrievable path, deriving the name from it.
    pub fn from_href(href: impl Into<String>) -> Self {
        let href = href.into();
        let name = utils::last_segment(&href).to_string();
        Self { name, href }
    }
}

/// Ordered entries of one listing response. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryListing(Vec<FileEntry>);

impl DirectoryListing {
    pub fn new(entries: Vec<FileEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First entry with the given name, in listing order.
    pub fn find(&self, name: &str) -> Option<&FileEntry> {
        self.0.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.0.iter()
    }
}

impl FromIterator<FileEntry> for DirectoryListing {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for DirectoryListing {
    type Item = FileEntry;
    type IntoIter = std::vec::IntoIter<FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A local blob handed to the controller for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name, sent as the multipart part's file name.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a local file, keeping only its final path component as the name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| CoreError::Other(format!("Not a file path: {}", path.display())))?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self { name, bytes })
    }
}
