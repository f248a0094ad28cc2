//! HTTP API tests
//!
//! Drives the full route table through `actix_web::test` with an in-memory
//! store, plus a failing store for the 503 paths.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;

use surl::api::middleware::{AccessLog, RequestIdMiddleware};
use surl::api::services::AppStartTime;
use surl::api::services::types::{ListResponse, ReadinessResponse, ShortUrlResponse};
use surl::errors::{Result, SurlError};
use surl::services::{AuthGuard, CollisionPolicy, ShortenService, TokenGenerator};
use surl::storage::{MappingStore, MemoryStore, ScanPage};

// =============================================================================
// Test Setup
// =============================================================================

const SECRET: &str = "s3cret";

fn build_service(store: Arc<dyn MappingStore>, require_auth: bool) -> Arc<ShortenService> {
    Arc::new(ShortenService::new(
        store,
        TokenGenerator::new(8).unwrap(),
        AuthGuard::new(require_auth, Some(SECRET)),
        CollisionPolicy::default(),
    ))
}

macro_rules! init_app {
    ($service:expr, $require_auth:expr) => {{
        let service = $service;
        let require_auth = $require_auth;
        test::init_service(
            App::new()
                .wrap(AccessLog)
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(service))
                .app_data(web::Data::new(AppStartTime::now()))
                .configure(move |cfg| surl::api::configure(cfg, require_auth)),
        )
        .await
    }};
}

/// 所有操作都报告后端不可用
struct FailingStore;

#[async_trait]
impl MappingStore for FailingStore {
    async fn put(&self, _token: &str, _target: &str) -> Result<()> {
        Err(SurlError::store_unavailable("connection refused"))
    }

    async fn put_if_absent(&self, _token: &str, _target: &str) -> Result<bool> {
        Err(SurlError::store_unavailable("connection refused"))
    }

    async fn get(&self, _token: &str) -> Result<Option<String>> {
        Err(SurlError::store_unavailable("connection refused"))
    }

    async fn delete(&self, _token: &str) -> Result<bool> {
        Err(SurlError::store_unavailable("connection refused"))
    }

    async fn scan_page(&self, _cursor: u64) -> Result<ScanPage> {
        Err(SurlError::store_unavailable("connection refused"))
    }

    async fn ping(&self) -> Result<()> {
        Err(SurlError::store_unavailable("connection refused"))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

// =============================================================================
// Full scenario
// =============================================================================

#[actix_rt::test]
async fn test_create_redirect_delete_scenario() {
    let service = build_service(Arc::new(MemoryStore::new()), true);
    let app = init_app!(service, true);

    let req = TestRequest::post()
        .uri("/shorten")
        .set_form([("url", "https://example.com")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ShortUrlResponse = test::read_body_json(resp).await;
    let token = body.short_url;
    assert_eq!(token.len(), 8);

    let req = TestRequest::get()
        .uri(&format!("/r/{}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get("location").unwrap(),
        "https://example.com"
    );

    let req = TestRequest::delete()
        .uri(&format!("/d/{}?code={}", token, SECRET))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ShortUrlResponse = test::read_body_json(resp).await;
    assert_eq!(body.short_url, token);

    let req = TestRequest::get()
        .uri(&format!("/r/{}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(resp).await;
    assert_eq!(body, "Not Found");
}

// =============================================================================
// /shorten
// =============================================================================

#[actix_rt::test]
async fn test_shorten_reads_query_string() {
    let service = build_service(Arc::new(MemoryStore::new()), true);
    let app = init_app!(service.clone(), true);

    let req = TestRequest::post()
        .uri("/shorten?url=https%3A%2F%2Fexample.org%2Fq")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ShortUrlResponse = test::read_body_json(resp).await;

    assert_eq!(
        service.resolve(&body.short_url).await.unwrap(),
        "https://example.org/q"
    );
}

#[actix_rt::test]
async fn test_shorten_form_wins_over_query() {
    let service = build_service(Arc::new(MemoryStore::new()), true);
    let app = init_app!(service.clone(), true);

    let req = TestRequest::post()
        .uri("/shorten?url=https%3A%2F%2Fquery.example")
        .set_form([("url", "https://form.example")])
        .to_request();
    let body: ShortUrlResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        service.resolve(&body.short_url).await.unwrap(),
        "https://form.example"
    );
}

#[actix_rt::test]
async fn test_shorten_empty_form_value_does_not_use_query() {
    let store = Arc::new(MemoryStore::new());
    let app = init_app!(build_service(store.clone(), true), true);

    let req = TestRequest::post()
        .uri("/shorten?url=https%3A%2F%2Fquery.example")
        .set_form([("url", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[actix_rt::test]
async fn test_shorten_multipart_form() {
    let service = build_service(Arc::new(MemoryStore::new()), true);
    let app = init_app!(service.clone(), true);

    let body = "--XYZ\r\n\
                Content-Disposition: form-data; name=\"note\"\r\n\r\n\
                ignored\r\n\
                --XYZ\r\n\
                Content-Disposition: form-data; name=\"url\"\r\n\r\n\
                https://multipart.example/p\r\n\
                --XYZ--\r\n";
    let req = TestRequest::post()
        .uri("/shorten?url=https%3A%2F%2Fquery.example")
        .insert_header(("content-type", "multipart/form-data; boundary=XYZ"))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ShortUrlResponse = test::read_body_json(resp).await;

    assert_eq!(
        service.resolve(&body.short_url).await.unwrap(),
        "https://multipart.example/p"
    );
}

#[actix_rt::test]
async fn test_shorten_missing_url() {
    let store = Arc::new(MemoryStore::new());
    let app = init_app!(build_service(store.clone(), true), true);

    let req = TestRequest::post().uri("/shorten").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test::read_body(resp).await, "Bad Request");
    assert!(store.is_empty());
}

#[actix_rt::test]
async fn test_shorten_get_not_allowed() {
    let app = init_app!(build_service(Arc::new(MemoryStore::new()), true), true);

    let req = TestRequest::get().uri("/shorten?url=x").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}

// =============================================================================
// /r/{token}
// =============================================================================

#[actix_rt::test]
async fn test_redirect_unknown_and_empty_token() {
    let app = init_app!(build_service(Arc::new(MemoryStore::new()), true), true);

    let req = TestRequest::get().uri("/r/doesnotexist").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = TestRequest::get().uri("/r/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_redirect_head() {
    let store = Arc::new(MemoryStore::new());
    store.put("abc", "https://example.com/x").await.unwrap();
    let app = init_app!(build_service(store, true), true);

    let req = TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri("/r/abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get("location").unwrap(),
        "https://example.com/x"
    );
}

#[actix_rt::test]
async fn test_redirect_escapes_crlf_in_target() {
    let store = Arc::new(MemoryStore::new());
    store
        .put("crlf", "https://example.com/a\r\nX-Evil: 1")
        .await
        .unwrap();
    let app = init_app!(build_service(store, true), true);

    let req = TestRequest::get().uri("/r/crlf").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get("location").unwrap(),
        "https://example.com/a%0D%0AX-Evil: 1"
    );
    assert!(resp.headers().get("x-evil").is_none());
}

#[actix_rt::test]
async fn test_redirect_store_unavailable() {
    let app = init_app!(build_service(Arc::new(FailingStore), true), true);

    let req = TestRequest::get().uri("/r/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(test::read_body(resp).await, "Service Unavailable");
}

// =============================================================================
// /list and /d/{token}
// =============================================================================

#[actix_rt::test]
async fn test_list_with_code() {
    let store = Arc::new(MemoryStore::new());
    store.put("one", "https://one.example").await.unwrap();
    store.put("two", "https://two.example").await.unwrap();
    let app = init_app!(build_service(store, true), true);

    let req = TestRequest::get()
        .uri(&format!("/list?code={}", SECRET))
        .to_request();
    let body: ListResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.data.len(), 2);
    assert_eq!(body.data["one"], "https://one.example");
    assert_eq!(body.data["two"], "https://two.example");
}

#[actix_rt::test]
async fn test_list_empty_store_returns_empty_object() {
    let app = init_app!(build_service(Arc::new(MemoryStore::new()), true), true);

    let req = TestRequest::get()
        .uri(&format!("/list?code={}", SECRET))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, r#"{"data":{}}"#);
}

#[actix_rt::test]
async fn test_list_and_delete_reject_wrong_code() {
    let store = Arc::new(MemoryStore::new());
    store.put("keep", "https://example.com").await.unwrap();
    let app = init_app!(build_service(store.clone(), true), true);

    for uri in ["/list", "/list?code=", "/list?code=wrong"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "uri: {}", uri);
    }

    let req = TestRequest::delete()
        .uri("/d/keep?code=wrong")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(test::read_body(resp).await, "Unauthorized");

    assert_eq!(
        store.get("keep").await.unwrap().as_deref(),
        Some("https://example.com")
    );
}

#[actix_rt::test]
async fn test_delete_empty_token() {
    let app = init_app!(build_service(Arc::new(MemoryStore::new()), true), true);

    let req = TestRequest::delete()
        .uri(&format!("/d/?code={}", SECRET))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_delete_unknown_token() {
    let app = init_app!(build_service(Arc::new(MemoryStore::new()), true), true);

    let req = TestRequest::delete()
        .uri(&format!("/d/missing?code={}", SECRET))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_list_store_unavailable() {
    let app = init_app!(build_service(Arc::new(FailingStore), true), true);

    let req = TestRequest::get()
        .uri(&format!("/list?code={}", SECRET))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// require_auth = false
// =============================================================================

#[actix_rt::test]
async fn test_open_variant_plain_text_responses() {
    let service = build_service(Arc::new(MemoryStore::new()), false);
    let app = init_app!(service.clone(), false);

    let req = TestRequest::post()
        .uri("/shorten")
        .set_form([("url", "https://example.com")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let token = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert_eq!(token.len(), 8);
    assert_eq!(service.resolve(&token).await.unwrap(), "https://example.com");

    let req = TestRequest::delete()
        .uri(&format!("/d/{}", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "Deleted");

    let req = TestRequest::get().uri("/list").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Health and middleware
// =============================================================================

#[actix_rt::test]
async fn test_health_liveness() {
    let app = init_app!(build_service(Arc::new(FailingStore), true), true);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, ".");
}

#[actix_rt::test]
async fn test_health_readiness() {
    let app = init_app!(build_service(Arc::new(MemoryStore::new()), true), true);
    let req = TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ReadinessResponse = test::read_body_json(resp).await;
    assert_eq!(body.status, "healthy");
    assert_eq!(body.backend, "memory");
    assert!(body.error.is_none());

    let app = init_app!(build_service(Arc::new(FailingStore), true), true);
    let req = TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: ReadinessResponse = test::read_body_json(resp).await;
    assert_eq!(body.status, "unhealthy");
    assert!(body.error.is_some());
}

#[actix_rt::test]
async fn test_request_id_header() {
    let app = init_app!(build_service(Arc::new(MemoryStore::new()), true), true);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap();
    assert_eq!(generated.len(), 36);

    let req = TestRequest::get()
        .uri("/health")
        .insert_header(("X-Request-ID", "trace-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-42");
}
