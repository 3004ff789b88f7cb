//! In-process mock notebook server
//!
//! Serves canned JSON for the API routes, checks the access token on every
//! API request and serves `/files/*` from a temp dir with range support.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use nbprobe_core::application::ProbeRunner;
use nbprobe_core::domain::AccessToken;
use nbprobe_core::AuthScheme;
use nbprobe_infra_http::NotebookHttpClient;
use nbprobe_infra_system::JsonFileSink;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower_http::services::ServeDir;

pub const TOKEN: &str = "9d2f0c7e5b1a44e8b7c3";

/// Payload the mock returns for a known API path
pub fn payload_for(path: &str) -> Option<Value> {
    let value = match path {
        "/api/" => json!({"version": "2.14.1"}),
        "/lab/api/workspaces" => json!({"workspaces": {"ids": ["auto-x"], "values": []}}),
        "/api/sessions" => json!([]),
        "/api/kernels" => json!([{
            "id": "4b1c7a2e-0000-4000-8000-000000000001",
            "name": "python3",
            "execution_state": "idle",
            "connections": 1
        }]),
        "/api/contents" => json!({
            "name": "",
            "path": "",
            "type": "directory",
            "content": [{"name": "hello.txt", "type": "file"}]
        }),
        "/api/terminals" => json!([]),
        "/api/kernelspecs" => json!({
            "default": "python3",
            "kernelspecs": {"python3": {"name": "python3", "resources": {}}}
        }),
        "/api/status" => json!({"connections": 1, "kernels": 1}),
        "/api/me" => json!({"identity": {"username": "alice"}, "permissions": {}}),
        _ => return None,
    };
    Some(value)
}

/// One received API request
#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub authorized: bool,
}

#[derive(Clone)]
struct MockState {
    overrides: Arc<HashMap<String, (StatusCode, String)>>,
    hits: Arc<Mutex<Vec<Hit>>>,
}

pub struct MockServer {
    pub base_url: String,
    pub files: TempDir,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl MockServer {
    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }
}

/// Builder for per-test route overrides
#[derive(Default)]
pub struct MockServerBuilder {
    overrides: HashMap<String, (StatusCode, String)>,
    files: Vec<(String, String)>,
}

impl MockServerBuilder {
    pub fn respond(mut self, path: &str, status: StatusCode, body: &str) -> Self {
        self.overrides
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    pub fn file(mut self, name: &str, contents: &str) -> Self {
        self.files.push((name.to_string(), contents.to_string()));
        self
    }

    pub async fn spawn(self) -> MockServer {
        let files = tempfile::tempdir().expect("create files dir");
        for (name, contents) in &self.files {
            std::fs::write(files.path().join(name), contents).expect("write served file");
        }

        let hits: Arc<Mutex<Vec<Hit>>> = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            overrides: Arc::new(self.overrides),
            hits: hits.clone(),
        };

        let app = Router::new()
            .nest_service("/files", ServeDir::new(files.path()))
            .fallback(api)
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("get addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        MockServer {
            base_url: format!("http://{}/", addr),
            files,
            hits,
        }
    }
}

pub fn mock_server() -> MockServerBuilder {
    MockServerBuilder::default()
}

async fn api(
    State(state): State<MockState>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let path = uri.path().to_string();
    let header_ok = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("token {}", TOKEN))
        .unwrap_or(false);
    let authorized = header_ok || query.get("token").map(String::as_str) == Some(TOKEN);

    state.hits.lock().unwrap().push(Hit {
        path: path.clone(),
        authorized,
    });

    if !authorized {
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    if let Some((status, body)) = state.overrides.get(&path) {
        return (*status, body.clone()).into_response();
    }

    match payload_for(&path) {
        Some(value) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            value.to_string(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, r#"{"message": "Not Found"}"#).into_response(),
    }
}

/// Runner wired to real adapters against `base_url`, writing into `output_dir`
pub fn runner(base_url: &str, token: &str, auth: AuthScheme, output_dir: &Path) -> ProbeRunner {
    let transport = NotebookHttpClient::new(base_url, AccessToken::new(token), auth)
        .expect("create client");
    ProbeRunner::new(Arc::new(transport), Arc::new(JsonFileSink::new(output_dir)))
}
