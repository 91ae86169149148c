//! Error types for the uploadhub core crate.
//!
//! Only the orchestrating controller operations see these errors; each one is
//! converted into a status message there and never reaches the binder. The
//! binary crate wraps [`CoreError`] in `anyhow` at its edges (config loading,
//! reading local files).

use thiserror::Error;

/// Top-level error type encompassing all core error categories.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A file-store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A configuration error (invalid values, missing fields, parse failures).
    #[error("Config error: {0}")]
    Config(String),

    /// A low-level I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for errors that don't fit other categories.
    #[error("{0}")]
    Other(String),
}

/// Errors raised while talking to the file-store collaborator.
///
/// A received HTTP response is never an error for upload and delete, whatever
/// its status; only the listing treats a non-success status as a failure.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The request could not complete (DNS, connection, or transport failure).
    #[error("Network error: {0}")]
    Network(String),

    /// The listing endpoint answered with a non-success status.
    #[error("Directory listing not available (HTTP {status})")]
    ListingUnavailable { status: u16 },

    /// A request URL could not be built from the configuration.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Network(err.to_string())
    }
}
