//! HTTP implementation of [`FileStore`] backed by `reqwest`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use tracing::debug;

use super::store::{FileStore, StoreResponse};
use super::utils::{encode_name, join_url};
use super::UploadFile;
use crate::config::ClientConfig;
use crate::errors::{CoreError, StoreError};

/// File store reached over HTTP.
///
/// - `GET <base><uploadsPath>` lists files.
/// - `POST <base><uploadsPath>` uploads a multipart form.
/// - `DELETE <base><uploadsPath>/<encoded name>` deletes a file.
///
/// No timeouts are set; a hung request stays pending.
pub struct HttpFileStore {
    client: reqwest::Client,
    base_url: Url,
    uploads_url: String,
    upload_field: String,
}

impl HttpFileStore {
    /// Build a store from a validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("uploadhub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::from)?;

        Ok(Self {
            client,
            uploads_url: join_url(&config.base_url, &config.uploads_path),
            base_url,
            upload_field: config.upload_field.clone(),
        })
    }

    /// Absolute URL of the listing and upload endpoint.
    pub fn uploads_url(&self) -> &str {
        &self.uploads_url
    }

    /// Absolute URL for deleting `name`, which is encoded here exactly once.
    pub fn delete_url(&self, name: &str) -> String {
        format!("{}/{}", self.uploads_url, encode_name(name))
    }

    /// Resolve a listing `href` (absolute or relative) against the base URL.
    pub fn resolve_href(&self, href: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(href)
            .map_err(|e| StoreError::InvalidUrl(format!("{href}: {e}")))
    }
}

/// Read status, content type and body text of a received response.
///
/// A body that cannot be read counts as a network failure.
async fn read_response(resp: reqwest::Response) -> Result<StoreResponse, StoreError> {
    let status = resp.status().as_u16();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = resp.text().await?;
    Ok(StoreResponse {
        status,
        content_type,
        body,
    })
}

#[async_trait]
impl FileStore for HttpFileStore {
    async fn list(&self) -> Result<StoreResponse, StoreError> {
        debug!("GET {}", self.uploads_url);
        let resp = self.client.get(&self.uploads_url).send().await?;
        read_response(resp).await
    }

    async fn upload(&self, file: &UploadFile) -> Result<StoreResponse, StoreError> {
        debug!(
            "POST {} ({}, {} bytes)",
            self.uploads_url,
            file.name,
            file.bytes.len()
        );
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part(self.upload_field.clone(), part);
        let resp = self
            .client
            .post(&self.uploads_url)
            .multipart(form)
            .send()
            .await?;
        read_response(resp).await
    }

    async fn delete(&self, name: &str) -> Result<StoreResponse, StoreError> {
        let url = self.delete_url(name);
        debug!("DELETE {url}");
        let resp = self.client.delete(&url).send().await?;
        read_response(resp).await
    }

    async fn fetch(&self, href: &str) -> Result<(u16, Vec<u8>), StoreError> {
        let url = self.resolve_href(href)?;
        debug!("GET {url}");
        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;
        Ok((status, bytes.to_vec()))
    }
}
