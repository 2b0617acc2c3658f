//! 認証エンドポイント（サインアップ・ログイン）

use crate::auth::jwt::create_jwt;
use crate::auth::password::{hash_password, verify_password};
use crate::db::users;
use crate::error::ApiError;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use notes_common::error::NotesError;
use notes_common::types::PublicUser;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// サインアップリクエスト
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// ユーザー名
    #[serde(default)]
    pub username: String,
    /// メールアドレス
    #[serde(default)]
    pub email: String,
    /// 平文パスワード
    #[serde(default)]
    pub password: String,
}

/// ログインリクエスト
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// メールアドレス
    #[serde(default)]
    pub email: String,
    /// 平文パスワード
    #[serde(default)]
    pub password: String,
}

/// ログインレスポンス
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// JWTトークン
    pub token: String,
    /// 認証されたアカウント（password_hash除外）
    pub user: PublicUser,
}

/// POST /api/auth/signup
///
/// アカウントを作成する。パスワードは保存前にbcryptでハッシュ化され、
/// 平文がレスポンスやログに現れることはない。
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_string();

    if username.is_empty() || email.is_empty() || payload.password.len() < 6 {
        return Err(NotesError::Validation(
            "Please provide all fields, password must be 6+ characters.".to_string(),
        )
        .into());
    }

    if users::find_by_email(&state.db_pool, &email).await?.is_some() {
        return Err(
            NotesError::Conflict("User with this email already exists".to_string()).into(),
        );
    }

    let password_hash = hash_password(&payload.password)?;
    let user = users::create(&state.db_pool, &username, &email, &password_hash).await?;

    tracing::info!("User created: {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    ))
}

/// POST /api/auth/login
///
/// メールアドレスとパスワードを検証してJWTを発行する。
/// アカウント不在とパスワード不一致は同一のエラーとして扱い、
/// どちらが原因かを外部から区別できないようにする。
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = payload.email.trim().to_string();

    if email.is_empty() || payload.password.is_empty() {
        return Err(NotesError::Validation("Please enter all fields".to_string()).into());
    }

    let user = match users::find_by_email(&state.db_pool, &email).await? {
        Some(user) => user,
        None => return Err(NotesError::InvalidCredentials.into()),
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(NotesError::InvalidCredentials.into());
    }

    let token = create_jwt(&user.id.to_string(), &state.jwt_secret)?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Json(LoginResponse {
        token,
        user: user.into_public(),
    }))
}
