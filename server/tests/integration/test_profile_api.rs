//! Integration Test: Profile API
//!
//! プロフィールの取得・更新・アバター画像アップロードをテスト

use crate::support::{build_app, login, request, signup_and_login};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_get_profile_returns_public_user() {
    let (app, _state) = build_app().await;
    let token = signup_and_login(&app, "alice", "alice@example.com").await;

    let (status, body) = request(&app, Method::GET, "/api/profile", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_update_profile_with_json() {
    let (app, _state) = build_app().await;
    let token = signup_and_login(&app, "alice", "alice@example.com").await;

    let (status, body) = request(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&token),
        Some(json!({ "username": "alice2", "email": "alice2@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["user"]["username"], "alice2");
    assert_eq!(body["user"]["email"], "alice2@example.com");

    // 変更後のメールアドレスで、元のパスワードのままログインできる
    let (status, _) = login(&app, "alice2@example.com", "password123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_profile_rejects_empty_fields() {
    let (app, _state) = build_app().await;
    let token = signup_and_login(&app, "alice", "alice@example.com").await;

    let (status, body) = request(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&token),
        Some(json!({ "username": "", "email": "alice@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide all fields");
}

#[tokio::test]
async fn test_update_profile_rejects_taken_email() {
    let (app, _state) = build_app().await;
    let alice = signup_and_login(&app, "alice", "alice@example.com").await;
    signup_and_login(&app, "bob", "bob@example.com").await;

    let (status, body) = request(
        &app,
        Method::PUT,
        "/api/profile",
        Some(&alice),
        Some(json!({ "username": "alice", "email": "bob@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User with this email already exists");
}

#[tokio::test]
async fn test_update_profile_with_multipart_avatar() {
    let (app, _state) = build_app().await;
    let token = signup_and_login(&app, "alice", "alice@example.com").await;

    // Arrange: multipartボディを手組みする
    let boundary = "----notes-test-boundary";
    let multipart_body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"username\"\r\n\r\n\
         alice2\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"email\"\r\n\r\n\
         alice2@example.com\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"profileImage\"; filename=\"avatar.png\"\r\n\
         Content-Type: image/png\r\n\r\n\
         fake png bytes\r\n\
         --{b}--\r\n",
        b = boundary
    );

    // Act: アバター付きで更新
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri("/api/profile")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(multipart_body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    // Assert: プロフィールが更新され、画像パスが返る
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "alice2");
    let image_path = body["user"]["profile_image"]
        .as_str()
        .expect("profile_image should be set");
    assert!(image_path.starts_with("/uploads/"));
    assert!(image_path.ends_with(".png"));

    // 保存された画像がそのパスで配信される
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(image_path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    assert_eq!(&bytes[..], b"fake png bytes");

    // 画像なしのmultipart更新では既存の画像が残る
    let multipart_body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"username\"\r\n\r\n\
         alice3\r\n\
         --{b}\r\n\
         Content-Disposition: form-data; name=\"email\"\r\n\r\n\
         alice3@example.com\r\n\
         --{b}--\r\n",
        b = boundary
    );
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri("/api/profile")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(multipart_body))
                .unwrap(),
        )
        .await
        .unwrap();

    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["user"]["profile_image"], image_path);
}
