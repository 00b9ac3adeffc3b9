use axum::http::StatusCode;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use vortexscope::api::{self, AppState};
use vortexscope::{BootstrapPolicy, Databases, Decimal, MockChainState, Orchestrator};

fn setup_test_app(database_dir: std::path::PathBuf) -> axum::Router {
    let databases = Arc::new(Databases::new(database_dir, "vortex"));
    let chain = Arc::new(MockChainState::new());
    let policy = BootstrapPolicy {
        bootstrap_root: Decimal::zero(),
        root_asset_id: 1,
    };
    let orchestrator = Arc::new(Orchestrator::new(databases, chain, policy));
    api::create_router(AppState::new(orchestrator))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let request = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let temp = TempDir::new().unwrap();
    let (status, body) = get(setup_test_app(temp.path().to_path_buf()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ok"));
}

#[tokio::test]
async fn test_ready_endpoint_opens_default_database() {
    let temp = TempDir::new().unwrap();
    let (status, body) = get(setup_test_app(temp.path().to_path_buf()), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ready"));
    assert!(body.contains("vortex"));
    assert!(temp.path().join("vortex.db").exists());
}

#[tokio::test]
async fn test_ready_endpoint_unavailable_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();

    let (status, body) = get(setup_test_app(blocker), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("unavailable"));
}
