//! 統合テスト用の共通ヘルパー
//!
//! インメモリSQLiteの単一接続プール上にアプリを構築し、
//! towerの`oneshot`でリクエストを送る。

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use notes_server::{api, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// テスト用JWT秘密鍵
pub const TEST_JWT_SECRET: &str = "test-secret";

/// テスト用アプリケーションを構築
///
/// インメモリSQLiteは接続ごとに別のデータベースになるため、
/// プールは単一接続に固定する。
pub async fn build_app() -> (Router, AppState) {
    let db_pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations");

    let uploads_dir = tempfile::tempdir()
        .expect("Failed to create temp uploads dir")
        .keep();

    let state = AppState {
        db_pool,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        uploads_dir,
    };

    (api::create_router(state.clone()), state)
}

/// JSONリクエストを送ってステータスとJSONボディを返す
pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request should not fail at the transport level");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// アカウントを作成
pub async fn signup(
    app: &Router,
    username: &str,
    email: &str,
    password: &str,
) -> (StatusCode, Value) {
    request(
        app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "username": username,
            "email": email,
            "password": password,
        })),
    )
    .await
}

/// ログインしてレスポンスを返す
pub async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    request(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

/// アカウントを作成してログインし、JWTトークンを返す
pub async fn signup_and_login(app: &Router, username: &str, email: &str) -> String {
    let (status, _) = signup(app, username, email, "password123").await;
    assert_eq!(status, StatusCode::CREATED, "signup should succeed");

    let (status, body) = login(app, email, "password123").await;
    assert_eq!(status, StatusCode::OK, "login should succeed");

    body["token"]
        .as_str()
        .expect("login response should contain a token")
        .to_string()
}
