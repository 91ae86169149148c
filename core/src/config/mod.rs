pub mod expand;

use std::path::PathBuf;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CoreError;

/// Environment variable that overrides [`ClientConfig::base_url`].
pub const BASE_URL_ENV: &str = "UPLOADHUB_BASE_URL";

/// Client configuration for reaching the file store.
///
/// - `base_url`: scheme + authority of the store (default `http://127.0.0.1:8080`).
/// - `uploads_path`: listing/upload endpoint path, also the delete prefix.
/// - `upload_field`: multipart field name carrying the file.
/// - `assume_yes`: answer every delete confirmation with yes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_uploads_path")]
    pub uploads_path: String,
    #[serde(default = "default_upload_field")]
    pub upload_field: String,
    #[serde(default)]
    pub assume_yes: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            uploads_path: default_uploads_path(),
            upload_field: default_upload_field(),
            assume_yes: false,
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        serde_json::from_str(text).map_err(|e| CoreError::Config(format!("Invalid JSON: {e}")))
    }

    /// Load a configuration file. `~` in the path is expanded.
    pub fn load(path: &str) -> Result<Self, CoreError> {
        let path = expand::expand_tilde(path);
        debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|e| {
            CoreError::Config(format!("Cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Load `path` if given; otherwise the default location if that file
    /// exists, else built-in defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, CoreError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path.to_string_lossy()),
            _ => Ok(Self::default()),
        }
    }

    /// Return a copy with all `${env:...}` placeholders expanded.
    pub fn expand(mut self) -> Self {
        self.base_url = expand::expand_env_placeholders(&self.base_url);
        self.uploads_path = expand::expand_env_placeholders(&self.uploads_path);
        self
    }

    /// Apply `UPLOADHUB_BASE_URL` when it is set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        self
    }

    /// Check that the values can be turned into request URLs.
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| CoreError::Config(format!("baseUrl '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "baseUrl must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if !self.uploads_path.starts_with('/') {
            return Err(CoreError::Config(format!(
                "uploadsPath must start with '/', got '{}'",
                self.uploads_path
            )));
        }
        if self.upload_field.trim().is_empty() {
            return Err(CoreError::Config("uploadField must not be empty".into()));
        }
        Ok(())
    }
}

/// `<config dir>/uploadhub/config.json`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("uploadhub").join("config.json"))
}

// --- Default value functions ---

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_uploads_path() -> String {
    "/uploads".to_string()
}

fn default_upload_field() -> String {
    "file".to_string()
}
