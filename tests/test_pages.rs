use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use promptcraft::{router, AppState, PromptGenerator};

fn app() -> Router {
    router(AppState::new(PromptGenerator::new(None, 4000)))
}

async fn get(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let res = app().oneshot(req).await.unwrap();
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, bytes.to_vec())
}

#[tokio::test]
async fn test_index_page() {
    let (status, content_type, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("/api/generate"));
    assert!(html.contains("接続エラーが発生しました"));
}

#[tokio::test]
async fn test_template_catalogue() {
    let (status, _, body) = get("/api/templates").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let templates = json["templates"].as_array().unwrap();
    let tones = json["tones"].as_array().unwrap();
    assert_eq!(templates.len(), 6);
    assert_eq!(tones.len(), 4);
    assert_eq!(templates[0]["id"], "business-email");
    assert_eq!(templates[0]["label"], "ビジネスメール");
    assert_eq!(tones[3]["id"], "professional");
}

#[tokio::test]
async fn test_health_reports_missing_provider() {
    let (status, _, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["provider"].is_null());
}

#[tokio::test]
async fn test_generate_rejects_get() {
    let (status, _, _) = get("/api/generate").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
