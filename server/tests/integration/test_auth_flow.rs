//! Integration Test: Signup and Login Flow
//!
//! サインアップからログインまでの認証フローをテスト

use crate::support::{build_app, login, request, signup};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_signup_then_login_returns_token_and_public_user() {
    let (app, _state) = build_app().await;

    // Arrange: アカウントを作成
    let (status, body) = signup(&app, "alice", "alice@example.com", "password123").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");

    // Act: ログイン
    let (status, body) = login(&app, "alice@example.com", "password123").await;

    // Assert: トークンと公開プロフィールが返り、ハッシュは含まれない
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_signup_trims_username_and_email() {
    let (app, _state) = build_app().await;

    let (status, _) = signup(&app, "  alice  ", "  alice@example.com  ", "password123").await;
    assert_eq!(status, StatusCode::CREATED);

    // トリム済みのメールアドレスでログインできる
    let (status, _) = login(&app, "alice@example.com", "password123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_signup_rejects_missing_fields_and_short_password() {
    let (app, _state) = build_app().await;

    for (username, email, password) in [
        ("", "alice@example.com", "password123"),
        ("alice", "", "password123"),
        ("alice", "alice@example.com", "12345"),
        ("   ", "alice@example.com", "password123"),
    ] {
        let (status, body) = signup(&app, username, email, password).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Please provide all fields, password must be 6+ characters."
        );
    }
}

#[tokio::test]
async fn test_signup_rejects_duplicate_email() {
    let (app, _state) = build_app().await;

    signup(&app, "alice", "alice@example.com", "password123").await;
    let (status, body) = signup(&app, "other", "alice@example.com", "password123").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User with this email already exists");
}

#[tokio::test]
async fn test_login_hides_whether_account_exists() {
    let (app, _state) = build_app().await;

    signup(&app, "alice", "alice@example.com", "password123").await;

    // Act: 不在アカウントと誤パスワード
    let (unknown_status, unknown_body) = login(&app, "ghost@example.com", "password123").await;
    let (wrong_status, wrong_body) = login(&app, "alice@example.com", "wrong-password").await;

    // Assert: どちらも同一のエラーレスポンス
    assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_rejects_missing_fields() {
    let (app, _state) = build_app().await;

    let (status, body) = request(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please enter all fields");
}
