use axum::http::StatusCode;
use serde_json::{Value, json};

use beavery_testing::fixture::TestUser;

use crate::helpers::{MockIdentity, MockUserRepo, server, with_token};

#[tokio::test]
async fn should_answer_auth_test_without_token() {
    let server = server(MockUserRepo::empty(), MockIdentity::default());
    let resp = server.get("/auth/test").await;
    resp.assert_status_ok();
    resp.assert_json(&json!({ "message": "Auth router is working!" }));
}

#[tokio::test]
async fn should_return_caller_from_auth_me() {
    let user = TestUser::new("ada@example.com");
    let server = server(MockUserRepo::empty(), MockIdentity::with_users(&[&user]));

    let resp = with_token(server.get("/auth/me"), &user.token).await;

    resp.assert_status_ok();
    resp.assert_json(&json!({
        "message": "You are authenticated!",
        "user": { "id": user.id.to_string(), "email": "ada@example.com" },
    }));
}

#[tokio::test]
async fn should_reject_auth_me_without_token() {
    let server = server(MockUserRepo::empty(), MockIdentity::default());
    let resp = server.get("/auth/me").await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<Value>()["kind"], "MISSING_TOKEN");
}

#[tokio::test]
async fn should_reject_non_bearer_scheme() {
    let server = server(MockUserRepo::empty(), MockIdentity::default());
    let resp = server
        .get("/auth/me")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        )
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_greet_on_api_root() {
    let server = server(MockUserRepo::empty(), MockIdentity::default());
    let resp = server.get("/api").await;
    resp.assert_status_ok();
    resp.assert_text("Hello from Beavery backend!");
}

#[tokio::test]
async fn should_return_json_404_with_path() {
    let server = server(MockUserRepo::empty(), MockIdentity::default());
    let resp = server.get("/does/not/exist").await;
    resp.assert_status_not_found();
    resp.assert_json(&json!({ "error": "Not found", "path": "/does/not/exist" }));
}

#[tokio::test]
async fn should_expose_health_endpoints() {
    let server = server(MockUserRepo::empty(), MockIdentity::default());
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let server = server(MockUserRepo::empty(), MockIdentity::default());
    let resp = server.get("/api").await;
    assert!(resp.headers().get("x-request-id").is_some());
}
