use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use project_index_server::http::{create_router, AppState};
use project_index_server::utils::config::{Config, Layout};

const BOUNDARY: &str = "----editor-test-boundary";

/// Helper to build a router over a temp site root
fn create_app(site_root: &Path) -> Router {
    create_app_with_layout(site_root, Layout::Sibling)
}

fn create_app_with_layout(site_root: &Path, layout: Layout) -> Router {
    let config = Config {
        site_root: site_root.to_path_buf(),
        layout,
        owner_name: Some("Site Owner".to_string()),
        ..Default::default()
    };
    let state = AppState::from_config(Arc::new(config)).unwrap();
    create_router(state)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, file_name, content) in parts {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        match file_name {
            Some(file_name) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                name, file_name
            )),
            None => body.push_str(&format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_root_redirects_to_editor_page() {
    let temp_dir = TempDir::new().unwrap();
    let app = create_app(temp_dir.path());

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/index.html");
}

#[tokio::test]
async fn test_static_assets_are_served_from_editor_root() {
    let temp_dir = TempDir::new().unwrap();
    let editor_root = temp_dir.path().join("template-editor");
    fs::create_dir_all(&editor_root).unwrap();
    fs::write(editor_root.join("index.html"), "<h1>Editor</h1>").unwrap();
    let app = create_app(temp_dir.path());

    let request = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Editor</h1>");

    let request = Request::builder().uri("/missing.css").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_endpoint_returns_stored_path() {
    let temp_dir = TempDir::new().unwrap();
    let app = create_app(temp_dir.path());

    let (status, body) = send(
        &app,
        json_request("POST", "/api/save", json!({
            "slug": "My Project!",
            "html": "<p>x</p>",
            "meta": {"title": "T", "tags": "one"}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "path": "projects/my-project-.html"}));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("projects/my-project-.html")).unwrap(),
        "<p>x</p>"
    );

    let (status, body) = send(&app, Request::builder().uri("/api/projects").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects"][0]["slug"], "my-project-");
    assert_eq!(body["projects"][0]["tags"], json!(["one"]));
}

#[tokio::test]
async fn test_save_endpoint_nested_layout() {
    let temp_dir = TempDir::new().unwrap();
    let site_root = temp_dir.path();
    let app = create_app_with_layout(site_root, Layout::Nested);

    let (status, body) = send(
        &app,
        json_request("POST", "/api/save", json!({"slug": "case-study", "html": "<h1>Case</h1>"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "path": "template-editor/projects/case-study.html"}));
    assert_eq!(
        fs::read_to_string(site_root.join("template-editor/projects/case-study.html")).unwrap(),
        "<h1>Case</h1>"
    );
    assert!(site_root.join("template-editor/projects.json").exists());
    assert!(!site_root.join("projects.json").exists());

    // The saved page is reachable through the editor's static file service
    let request = Request::builder().uri("/projects/case-study.html").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_save_endpoint_rejects_missing_slug() {
    let temp_dir = TempDir::new().unwrap();
    let app = create_app(temp_dir.path());

    let (status, body) = send(&app, json_request("POST", "/api/save", json!({"html": "<p></p>"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"ok": false, "error": "Missing slug"}));
}

#[tokio::test]
async fn test_sync_endpoint_reports_changes() {
    let temp_dir = TempDir::new().unwrap();
    let projects_dir = temp_dir.path().join("projects");
    fs::create_dir_all(&projects_dir).unwrap();
    fs::write(projects_dir.join("orphan.html"), "<title>Orphan Page | Site Owner</title>").unwrap();
    fs::write(
        temp_dir.path().join("projects.json"),
        json!([{"slug": "deleted", "title": "Gone"}]).to_string(),
    )
    .unwrap();
    let app = create_app(temp_dir.path());

    let (status, body) = send(&app, json_request("POST", "/api/sync", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["added"], json!(["orphan"]));
    assert_eq!(body["removedCount"], 1);
    assert_eq!(body["projects"][0]["title"], "Orphan Page");
    assert_eq!(body["message"], "Synced 1 project(s): 1 added, 1 removed");
}

#[tokio::test]
async fn test_upload_endpoint_stores_sanitized_file() {
    let temp_dir = TempDir::new().unwrap();
    let app = create_app(temp_dir.path());

    let request = multipart_request(&[("caption", None, "ignored"), ("image", Some("hero shot (1).png"), "PNGDATA")]);
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "url": "public/images/hero_shot__1_.png"}));

    let stored = temp_dir.path().join("template-editor/public/images/hero_shot__1_.png");
    assert_eq!(fs::read_to_string(stored).unwrap(), "PNGDATA");
}

#[tokio::test]
async fn test_upload_endpoint_without_file_is_bad_request() {
    let temp_dir = TempDir::new().unwrap();
    let app = create_app(temp_dir.path());

    let (status, body) = send(&app, multipart_request(&[("caption", None, "no file here")])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"ok": false, "error": "No file uploaded"}));
}
