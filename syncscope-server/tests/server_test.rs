//! End-to-end wiring from configuration to router

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use syncscope_config::SyncscopeConfig;
use syncscope_server::Server;
use tempfile::TempDir;
use tower::ServiceExt;

fn config_in(dir: &TempDir) -> SyncscopeConfig {
    let mut config = SyncscopeConfig::default();
    config.registry.list_path = dir.path().join("repos");
    config.service.systemctl_path = dir.path().join("no-systemctl").display().to_string();
    config.journal.journalctl_path = dir.path().join("no-journalctl").display().to_string();
    config
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health_and_repositories() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("repos"), "alpha\n\nbeta\n").unwrap();

    let app = Server::new(config_in(&dir)).unwrap().build_app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["liveObservers"], 0);

    let (status, body) = get(&app, "/api/repositories").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[tokio::test]
async fn test_missing_systemctl_reports_inactive() {
    let dir = TempDir::new().unwrap();
    let app = Server::new(config_in(&dir)).unwrap().build_app();

    let (status, body) = get(&app, "/api/service-status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], false);
    assert_eq!(body["uptime"], "Unknown");
}

#[tokio::test]
async fn test_missing_journalctl_is_a_server_error() {
    let dir = TempDir::new().unwrap();
    let app = Server::new(config_in(&dir)).unwrap().build_app();

    let (status, body) = get(&app, "/api/logs?lines=10").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Failed to read logs");
}

#[tokio::test]
async fn test_configured_prefix_is_honoured() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("repos"), "alpha\n").unwrap();
    let mut config = config_in(&dir);
    config.server.api_prefix = "/v1".to_string();

    let app = Server::new(config).unwrap().build_app();

    let (status, _) = get(&app, "/v1/repositories").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/api/repositories").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
