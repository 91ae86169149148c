//! Shared test utilities for uploadhub core integration tests.
//!
//! Provides an in-process file store speaking the same HTTP surface as the
//! real collaborator (`GET`/`POST /uploads`, `GET`/`DELETE /uploads/<name>`),
//! with knobs to force failure statuses and a record of what it received.

// Each integration test is compiled as its own crate, so not every test file
// uses every function from this shared module. Suppress dead_code warnings.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::task::JoinHandle;
use uploadhub_core::config::ClientConfig;
use uploadhub_core::files::HttpFileStore;

/// One multipart field as the server saw it.
#[derive(Debug, Clone)]
pub struct ReceivedField {
    pub field_name: Option<String>,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Mutable server state, shared with the test body.
#[derive(Debug, Default)]
pub struct ServerState {
    /// Stored files, listed in name order.
    pub files: BTreeMap<String, Vec<u8>>,
    /// When set, the listing answers with this status and a junk body.
    pub force_listing_status: Option<u16>,
    /// When set, uploads answer with this status/body and store nothing.
    pub force_upload: Option<(u16, String)>,
    /// When set, the listing is served verbatim with this content type.
    pub listing_override: Option<(String, String)>,
    pub list_calls: usize,
    /// Raw request paths of DELETE calls, still percent-encoded.
    pub delete_paths: Vec<String>,
    /// Multipart fields of every upload, in arrival order.
    pub upload_fields: Vec<Vec<ReceivedField>>,
}

pub type Shared = Arc<Mutex<ServerState>>;

/// A running fixture server. Aborted on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Shared,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerState::default()).await
    }

    pub async fn start_with(initial: ServerState) -> Self {
        let state: Shared = Arc::new(Mutex::new(initial));
        let app = Router::new()
            .route("/uploads", get(list).post(upload))
            .route("/uploads/*name", get(fetch).delete(remove))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fixture server");
        let addr = listener.local_addr().expect("fixture server address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url(),
            ..Default::default()
        }
    }

    pub fn store(&self) -> HttpFileStore {
        HttpFileStore::new(&self.config()).expect("fixture store config is valid")
    }

    pub fn add_file(&self, name: &str, bytes: &[u8]) {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(name.to_string(), bytes.to_vec());
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn delete_paths(&self) -> Vec<String> {
        self.state.lock().unwrap().delete_paths.clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Base URL of a local port with nothing listening on it.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

/// Autoindex-style page: one anchor per stored file, raw name in the href.
pub fn render_listing(files: &BTreeMap<String, Vec<u8>>) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html><body><h1>Index of /uploads/</h1><ul>\n");
    for name in files.keys() {
        html.push_str(&format!("<li><a href=\"/uploads/{name}\">{name}</a></li>\n"));
    }
    html.push_str("</ul></body></html>\n");
    html
}

// --- Handlers ---

async fn list(State(state): State<Shared>) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    state.list_calls += 1;

    if let Some(status) = state.force_listing_status {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (
            status,
            [(header::CONTENT_TYPE, "text/html".to_string())],
            "<a href=\"/uploads/should-not-appear\">x</a>".to_string(),
        );
    }
    if let Some((content_type, body)) = state.listing_override.clone() {
        return (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body);
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html".to_string())],
        render_listing(&state.files),
    )
}

async fn upload(State(state): State<Shared>, mut multipart: Multipart) -> impl IntoResponse {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        fields.push(ReceivedField {
            field_name,
            file_name,
            bytes,
        });
    }

    let mut state = state.lock().unwrap();
    state.upload_fields.push(fields.clone());

    if let Some((status, body)) = state.force_upload.clone() {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, body);
    }

    let Some(file) = fields.into_iter().find(|f| f.field_name.as_deref() == Some("file")) else {
        return (StatusCode::BAD_REQUEST, "No file field".to_string());
    };
    let name = file.file_name.unwrap_or_else(|| "upload.bin".to_string());
    state.files.insert(name.clone(), file.bytes);
    (StatusCode::CREATED, format!("File uploaded: {name}"))
}

async fn fetch(State(state): State<Shared>, Path(name): Path<String>) -> impl IntoResponse {
    match state.lock().unwrap().files.get(&name) {
        Some(bytes) => (StatusCode::OK, bytes.clone()),
        None => (StatusCode::NOT_FOUND, b"Not found".to_vec()),
    }
}

async fn remove(
    State(state): State<Shared>,
    uri: Uri,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    state.delete_paths.push(uri.path().to_string());
    match state.files.remove(&name) {
        Some(_) => (StatusCode::OK, format!("Deleted {name}")),
        None => (StatusCode::NOT_FOUND, format!("No such file: {name}")),
    }
}
