use super::*;
use axum::http::Request;
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use tower::ServiceExt;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::AppConfig;
use crate::routes::app;

fn router(server: &MockServer) -> axum::Router {
    app(AppState::new(AppConfig::for_backend(&server.uri())).unwrap())
}

// =============================================================================
// target_url
// =============================================================================

#[test]
fn target_url_joins_prefix_tail_and_query() {
    assert_eq!(target_url("http://b:3000", "auth/me", None), "http://b:3000/api/pina/auth/me");
    assert_eq!(target_url("http://b:3000", "/health", Some("a=1&b=2")), "http://b:3000/api/pina/health?a=1&b=2");
    assert_eq!(target_url("http://b:3000", "health", Some("")), "http://b:3000/api/pina/health");
}

#[test]
fn raw_tail_strips_either_prefix() {
    assert_eq!(raw_tail("/api/pina/files/a%2Fb"), "/files/a%2Fb");
    assert_eq!(raw_tail("/pina/x%3Fy%3D1"), "/x%3Fy%3D1");
}

#[test]
fn hop_headers_are_removed() {
    let mut headers = HeaderMap::new();
    headers.insert(HOST, "front.test".parse().unwrap());
    headers.insert(CONNECTION, "keep-alive".parse().unwrap());
    headers.insert(CONTENT_LENGTH, "3".parse().unwrap());
    headers.insert(COOKIE, "refreshToken=rt".parse().unwrap());
    strip_hop_headers(&mut headers);
    assert_eq!(headers.len(), 1);
    assert!(headers.contains_key(COOKIE));
}

// =============================================================================
// forward
// =============================================================================

#[tokio::test]
async fn google_start_is_public_and_redirect_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pina/auth/google"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "https://accounts.google.test/o/oauth2")
                .insert_header("set-cookie", "oauth_state=xyz; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = router(&server)
        .oneshot(Request::get("/api/pina/auth/google").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "https://accounts.google.test/o/oauth2");
    assert_eq!(response.headers().get(SET_COOKIE).unwrap(), "oauth_state=xyz; Path=/; HttpOnly");
}

#[tokio::test]
async fn legacy_prefix_maps_to_api_path_with_query_cookies_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pina/things"))
        .and(query_param("page", "2"))
        .and(header("cookie", "refreshToken=rt"))
        .and(body_string("{\"a\":1}"))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::post("/pina/things?page=2")
        .header(COOKIE, "refreshToken=rt")
        .header("content-type", "application/json")
        .body(Body::from("{\"a\":1}"))
        .unwrap();
    let response = router(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"created");
}

#[tokio::test]
async fn encoded_slash_and_question_mark_reach_backend_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    for uri in ["/api/pina/files/a%2Fb", "/pina/x%3Fy%3D1"] {
        let response = router(&server)
            .oneshot(Request::get(uri).header(COOKIE, "accessToken=at").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].url.path(), "/api/pina/files/a%2Fb");
    assert_eq!(received[1].url.path(), "/api/pina/x%3Fy%3D1");
    assert_eq!(received[1].url.query(), None);
}

#[tokio::test]
async fn proxied_paths_are_guarded() {
    let server = MockServer::start().await;
    let response = router(&server)
        .oneshot(Request::get("/api/pina/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() {
    let state = AppState::new(AppConfig::for_backend("http://127.0.0.1:1")).unwrap();
    let response = app(state)
        .oneshot(
            Request::get("/api/pina/health")
                .header(COOKIE, "accessToken=at")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
