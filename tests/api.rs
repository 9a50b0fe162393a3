//! API integration tests.
//!
//! Drives the complete request flow through the router: middleware →
//! handlers → service → repository, without opening a socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use text_service::repository::MemoryRepository;
use text_service::{HttpServer, ServiceConfig};

const LANGUAGE_HEADER: &str = "Accept-Language";
const REQUEST_ID_HEADER: &str = "X-Request-ID";

fn seeded_repository() -> Arc<MemoryRepository> {
    let repo = MemoryRepository::new();
    repo.add_language("en");
    repo.add_language("fr");
    repo.add_text("greeting", "en", "Hello");
    repo.add_text("a", "fr", "alpha");
    repo.add_text("c", "fr", "gamma");
    repo.add_group("onboarding", &["a", "b", "c"]);
    Arc::new(repo)
}

fn test_router(repo: Arc<MemoryRepository>) -> axum::Router {
    HttpServer::new(ServiceConfig::default(), repo).test_router()
}

fn get(path: &str, language: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(lang) = language {
        builder = builder.header(LANGUAGE_HEADER, lang);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_get_text_by_key() {
    let router = test_router(seeded_repository());

    let response = router
        .oneshot(get("/v1/texts/key/greeting", Some("en")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({"greeting": "Hello"}));
}

#[tokio::test]
async fn test_get_text_by_key_unsupported_language() {
    let router = test_router(seeded_repository());

    let response = router
        .oneshot(get("/v1/texts/key/greeting", Some("xx")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("xx"));
}

#[tokio::test]
async fn test_get_text_by_key_missing_language_header() {
    let router = test_router(seeded_repository());

    let response = router
        .oneshot(get("/v1/texts/key/greeting", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "No language specified");
}

#[tokio::test]
async fn test_get_text_by_key_missing_key() {
    let router = test_router(seeded_repository());

    let response = router
        .oneshot(get("/v1/texts/key/nope", Some("en")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_text_group_partial_results() {
    let router = test_router(seeded_repository());

    let response = router
        .oneshot(get("/v1/texts/group/onboarding", Some("fr")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({"a": "alpha", "c": "gamma"}));
}

#[tokio::test]
async fn test_get_text_group_missing_group() {
    let router = test_router(seeded_repository());

    let response = router
        .oneshot(get("/v1/texts/group/nope", Some("en")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_group_language_check_runs_before_group_lookup() {
    let router = test_router(seeded_repository());

    // Missing group AND unsupported language: the language wins.
    let response = router
        .oneshot(get("/v1/texts/group/nope", Some("xx")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let router = test_router(seeded_repository());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/texts/key/greeting")
        .header(LANGUAGE_HEADER, "en")
        .header(REQUEST_ID_HEADER, "abc123")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let echoed = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert_eq!(echoed, "abc123");
}

#[tokio::test]
async fn test_request_id_is_generated_when_absent() {
    let router = test_router(seeded_repository());

    let response = router
        .oneshot(get("/v1/texts/key/greeting", Some("en")))
        .await
        .unwrap();

    let generated = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(!generated.is_empty());
    assert_eq!(generated, generated.to_lowercase());
}

#[tokio::test]
async fn test_request_id_is_echoed_on_errors_too() {
    let router = test_router(seeded_repository());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/v1/texts/key/nope")
        .header(LANGUAGE_HEADER, "en")
        .header(REQUEST_ID_HEADER, "err-correlation")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "err-correlation"
    );
}

#[tokio::test]
async fn test_health_up() {
    let router = test_router(seeded_repository());

    let response = router.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({"status": "UP", "db": "UP"}));
}

#[tokio::test]
async fn test_health_down_when_dependency_fails() {
    let repo = seeded_repository();
    repo.set_healthy(false);
    let router = test_router(repo);

    let response = router.oneshot(get("/health", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body, serde_json::json!({"status": "DOWN", "db": "DOWN"}));
}

#[tokio::test]
async fn test_method_not_allowed_on_known_route() {
    let router = test_router(seeded_repository());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/texts/key/greeting")
        .header(LANGUAGE_HEADER, "en")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = json_body(response).await;
    assert_eq!(body["status"], 405);
    assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn test_unknown_route_yields_structured_404() {
    let router = test_router(seeded_repository());

    let response = router.oneshot(get("/v1/nope", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_metrics_exposition_uses_route_patterns_and_excludes_itself() {
    let router = test_router(seeded_repository());

    // Generate some traffic on instrumented and excluded routes first.
    let _ = router
        .clone()
        .oneshot(get("/v1/texts/key/greeting", Some("en")))
        .await
        .unwrap();
    let _ = router.clone().oneshot(get("/health", None)).await.unwrap();

    let response = router
        .clone()
        .oneshot(get("/metrics", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .starts_with("text/plain"));

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let exposition = String::from_utf8(bytes.to_vec()).unwrap();

    // Counted under the route pattern, not the interpolated key.
    assert!(exposition.contains("http_requests_total"));
    assert!(exposition.contains("endpoint=\"/v1/texts/key/{key}\""));
    assert!(!exposition.contains("endpoint=\"/v1/texts/key/greeting\""));

    // Neither the metrics route nor the health route measures itself.
    assert!(!exposition.contains("endpoint=\"/metrics\""));
    assert!(!exposition.contains("endpoint=\"/health\""));
}
