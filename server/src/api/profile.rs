//! プロフィールエンドポイント
//!
//! 更新リクエストはJSONとmultipart/form-dataの両方を受け付ける。
//! multipartの場合は `profileImage` フィールドでアバター画像を
//! アップロードできる。パスワードハッシュはこの経路では変更されない。

use crate::db::users;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    Extension, Json,
};
use notes_common::auth::Claims;
use notes_common::error::NotesError;
use notes_common::types::PublicUser;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JSON形式のプロフィール更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    /// 新しいユーザー名
    #[serde(default)]
    pub username: String,
    /// 新しいメールアドレス
    #[serde(default)]
    pub email: String,
}

/// プロフィール更新レスポンス
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    /// 結果メッセージ
    pub message: String,
    /// 更新後のアカウント（password_hash除外）
    pub user: PublicUser,
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<PublicUser>, ApiError> {
    match users::find_by_id(&state.db_pool, &claims.sub).await? {
        Some(user) => Ok(Json(user.into_public())),
        None => Err(NotesError::NotFound("User not found".to_string()).into()),
    }
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    request: Request,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (username, email, profile_image) = if is_multipart {
        parse_multipart(&state, request).await?
    } else {
        let Json(payload) = Json::<UpdateProfileRequest>::from_request(request, &())
            .await
            .map_err(|e| NotesError::Validation(format!("Invalid request body: {}", e)))?;
        (payload.username, payload.email, None)
    };

    let username = username.trim().to_string();
    let email = email.trim().to_string();
    if username.is_empty() || email.is_empty() {
        return Err(NotesError::Validation("Please provide all fields".to_string()).into());
    }

    let user = users::update_profile(
        &state.db_pool,
        &claims.sub,
        &username,
        &email,
        profile_image.as_deref(),
    )
    .await?
    .ok_or_else(|| NotesError::NotFound("User not found".to_string()))?;

    tracing::info!("Profile updated: {}", user.id);

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: user.into_public(),
    }))
}

/// multipartボディからフィールドとアバター画像を取り出す
///
/// 画像は `<uploads_dir>/<uuid>.<ext>` に保存され、クライアントから
/// 参照可能なパス（"/uploads/<file>"）を返す。
async fn parse_multipart(
    state: &AppState,
    request: Request,
) -> Result<(String, String, Option<String>), ApiError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| NotesError::Validation(format!("Invalid multipart body: {}", e)))?;

    let mut username = String::new();
    let mut email = String::new();
    let mut profile_image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| NotesError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "username" => {
                username = field
                    .text()
                    .await
                    .map_err(|e| NotesError::Validation(format!("Invalid multipart body: {}", e)))?;
            }
            "email" => {
                email = field
                    .text()
                    .await
                    .map_err(|e| NotesError::Validation(format!("Invalid multipart body: {}", e)))?;
            }
            "profileImage" => {
                let extension = sanitize_extension(field.file_name());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| NotesError::Validation(format!("Invalid multipart body: {}", e)))?;
                if bytes.is_empty() {
                    continue;
                }

                let file_name = format!("{}.{}", Uuid::new_v4(), extension);
                tokio::fs::create_dir_all(&state.uploads_dir)
                    .await
                    .map_err(|e| {
                        NotesError::Internal(format!("Failed to create uploads dir: {}", e))
                    })?;
                tokio::fs::write(state.uploads_dir.join(&file_name), &bytes)
                    .await
                    .map_err(|e| NotesError::Internal(format!("Failed to save image: {}", e)))?;

                profile_image = Some(format!("/uploads/{}", file_name));
            }
            _ => {}
        }
    }

    Ok((username, email, profile_image))
}

/// アップロードファイル名から安全な拡張子を取り出す
///
/// 英数字のみ・8文字以内に制限し、それ以外は "bin" へフォールバック。
fn sanitize_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| std::path::Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string())
}
