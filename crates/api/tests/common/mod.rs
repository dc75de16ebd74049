#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use intake_api::config::ServerConfig;
use intake_api::router::build_app_router;
use intake_api::state::AppState;
use intake_db::OpportunityStore;

/// A router over a store living in its own temporary directory.
///
/// The directory is removed when the `TestApp` is dropped.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestApp {
    /// Path of the table file backing this app.
    pub fn table_path(&self) -> std::path::PathBuf {
        self.dir.path().join("opportunities.csv")
    }

    /// Load the table from disk, independently of the running app.
    pub fn reload_store(&self) -> OpportunityStore {
        OpportunityStore::load(self.table_path(), "OP-2026").unwrap()
    }

    /// Current view key of the session.
    pub async fn view_key(&self) -> u64 {
        self.state.session.lock().await.view_key.0
    }
}

/// Build a test `ServerConfig` pointing at `dir`.
pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        data_file: dir.path().join("opportunities.csv"),
        id_prefix: "OP-2026".to_string(),
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers over an
/// empty table in a fresh temporary directory.
pub fn build_test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let store = OpportunityStore::load(&config.data_file, config.id_prefix.clone()).unwrap();
    let state = AppState::new(store, config.clone());
    let router = build_app_router(state.clone(), &config);

    TestApp { router, state, dir }
}

pub async fn get(app: &TestApp, uri: &str) -> Response {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

/// POST a form-encoded body. `pairs` are encoded with `form_encode`.
pub async fn post_form(app: &TestApp, uri: &str, pairs: &[(&str, &str)]) -> Response {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_encode(pairs)))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}

/// Create an opportunity through the UI and return its id.
pub async fn create_via_ui(app: &TestApp) -> String {
    let response = post_form(app, "/opportunities", &[]).await;
    location(&response)
        .strip_prefix("/?opportunity_id=")
        .expect("create must redirect to the detail view")
        .to_string()
}

/// Form values filling all seven required fields.
pub fn complete_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("title", "Rapid sepsis panel"),
        ("geography", "EU"),
        ("submitted_by", "J. Doe"),
        ("problem_statement", "Late diagnosis"),
        ("proposed_product", "Cartridge assay"),
        ("intended_use", "Emergency department triage"),
        ("comments", "Tender window opens in Q3"),
    ]
}

fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(value: &str) -> String {
    let mut out = String::new();
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
