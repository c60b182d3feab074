use axum::http::StatusCode;
use serde_json::{Value, json};

use beavery_domain::UserId;
use beavery_testing::fixture::TestUser;

use crate::helpers::{MockIdentity, MockUserRepo, server, with_token};

const PATH: &str = "/auth/create-user";

// ── success ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_user_with_trimmed_name() {
    let user = TestUser::new("ada@example.com");
    let repo = MockUserRepo::empty();
    let identity = MockIdentity::with_users(&[&user]);
    let server = server(repo.clone(), identity.clone());

    let resp = with_token(server.post(PATH), &user.token)
        .json(&json!({ "name": "  Ada Lovelace  " }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["name"], "Ada Lovelace");
    assert!(body["created_at"].as_str().unwrap().ends_with('Z'));
    assert!(body["updated_at"].is_string());

    let rows = repo.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(
        identity.mirrored(),
        vec![(UserId(user.id), "Ada Lovelace".to_owned())]
    );
}

#[tokio::test]
async fn should_update_name_in_place_on_second_call() {
    let user = TestUser::new("ada@example.com");
    let repo = MockUserRepo::empty();
    let server = server(repo.clone(), MockIdentity::with_users(&[&user]));

    let first = with_token(server.post(PATH), &user.token)
        .json(&json!({ "name": "Ada" }))
        .await;
    first.assert_status_ok();
    let created_at = first.json::<Value>()["created_at"].clone();

    let second = with_token(server.post(PATH), &user.token)
        .json(&json!({ "name": "Countess" }))
        .await;
    second.assert_status_ok();
    let body: Value = second.json();
    assert_eq!(body["name"], "Countess");
    assert_eq!(body["created_at"], created_at);

    let rows = repo.rows();
    assert_eq!(rows.len(), 1, "second call must not insert a duplicate row");
    assert_eq!(rows[0].name.as_deref(), Some("Countess"));
}

#[tokio::test]
async fn should_succeed_when_metadata_mirror_fails() {
    let user = TestUser::new("ada@example.com");
    let identity = MockIdentity {
        mirror_fails: true,
        ..MockIdentity::with_users(&[&user])
    };
    let server = server(MockUserRepo::empty(), identity);

    let resp = with_token(server.post(PATH), &user.token)
        .json(&json!({ "name": "Ada" }))
        .await;
    resp.assert_status_ok();
}

#[tokio::test]
async fn should_accept_name_of_exactly_255_characters() {
    let user = TestUser::new("ada@example.com");
    let server = server(MockUserRepo::empty(), MockIdentity::with_users(&[&user]));

    let resp = with_token(server.post(PATH), &user.token)
        .json(&json!({ "name": "é".repeat(255) }))
        .await;
    resp.assert_status_ok();
}

// ── authentication ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_401_without_token_and_write_nothing() {
    let repo = MockUserRepo::empty();
    let server = server(repo.clone(), MockIdentity::default());

    let resp = server.post(PATH).json(&json!({ "name": "Ada" })).await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "MISSING_TOKEN");
    assert_eq!(body["error"], "No authorization token provided");
    assert!(repo.rows().is_empty());
}

#[tokio::test]
async fn should_return_401_for_unknown_token_and_write_nothing() {
    let user = TestUser::new("ada@example.com");
    let repo = MockUserRepo::empty();
    let server = server(repo.clone(), MockIdentity::with_users(&[&user]));

    let resp = with_token(server.post(PATH), "forged-token")
        .json(&json!({ "name": "Ada" }))
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<Value>()["error"], "Invalid or expired token");
    assert!(repo.rows().is_empty());
}

#[tokio::test]
async fn should_authenticate_before_reading_body() {
    let server = server(MockUserRepo::empty(), MockIdentity::default());

    let resp = server.post(PATH).text("not json").await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_return_401_when_provider_unreachable() {
    let user = TestUser::new("ada@example.com");
    let identity = MockIdentity {
        unavailable: true,
        ..MockIdentity::with_users(&[&user])
    };
    let server = server(MockUserRepo::empty(), identity);

    let resp = with_token(server.post(PATH), &user.token)
        .json(&json!({ "name": "Ada" }))
        .await;

    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(resp.json::<Value>()["kind"], "AUTHENTICATION_FAILED");
}

// ── validation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_missing_blank_and_non_string_names() {
    let user = TestUser::new("ada@example.com");
    let repo = MockUserRepo::empty();
    let server = server(repo.clone(), MockIdentity::with_users(&[&user]));

    for body in [
        json!({}),
        json!({ "name": null }),
        json!({ "name": "" }),
        json!({ "name": "   \t\n" }),
        json!({ "name": 42 }),
        json!({ "name": ["Ada"] }),
    ] {
        let resp = with_token(server.post(PATH), &user.token)
            .json(&body)
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(resp.json::<Value>()["kind"], "NAME_REQUIRED", "{body}");
    }
    assert!(repo.rows().is_empty());
}

#[tokio::test]
async fn should_reject_name_longer_than_255_characters() {
    let user = TestUser::new("ada@example.com");
    let repo = MockUserRepo::empty();
    let server = server(repo.clone(), MockIdentity::with_users(&[&user]));

    let resp = with_token(server.post(PATH), &user.token)
        .json(&json!({ "name": format!("  {}  ", "a".repeat(256)) }))
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "NAME_TOO_LONG");
    assert_eq!(body["error"], "Name must be 255 characters or less");
    assert!(repo.rows().is_empty());
}

#[tokio::test]
async fn should_reject_non_json_body() {
    let user = TestUser::new("ada@example.com");
    let server = server(MockUserRepo::empty(), MockIdentity::with_users(&[&user]));

    let resp = with_token(server.post(PATH), &user.token)
        .text("name=Ada")
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["kind"], "INVALID_BODY");
}

// ── conflicts and database failures ──────────────────────────────────────────

#[tokio::test]
async fn should_return_409_when_email_belongs_to_another_identity() {
    let original = TestUser::new("ada@example.com");
    let impostor = original.with_same_email();
    let repo = MockUserRepo::empty();
    let server = server(
        repo.clone(),
        MockIdentity::with_users(&[&original, &impostor]),
    );

    with_token(server.post(PATH), &original.token)
        .json(&json!({ "name": "Ada" }))
        .await
        .assert_status_ok();

    let resp = with_token(server.post(PATH), &impostor.token)
        .json(&json!({ "name": "Mallory" }))
        .await;

    resp.assert_status(StatusCode::CONFLICT);
    assert_eq!(resp.json::<Value>()["error"], "user already exists");
    let rows = repo.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, UserId(original.id));
    assert_eq!(rows[0].name.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn should_return_500_with_database_details() {
    let user = TestUser::new("ada@example.com");
    let server = server(MockUserRepo::broken(), MockIdentity::with_users(&[&user]));

    let resp = with_token(server.post(PATH), &user.token)
        .json(&json!({ "name": "Ada" }))
        .await;

    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "DATABASE");
    assert_eq!(body["details"]["code"], "57P01");
    assert!(body["details"]["message"].is_string());
}
