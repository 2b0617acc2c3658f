//! JWT生成と検証（jsonwebtoken実装）

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use notes_common::auth::Claims;
use notes_common::error::NotesError;

/// JWT有効期限（1時間）
const JWT_EXPIRATION_HOURS: i64 = 1;

/// JWTトークンを生成
///
/// # Arguments
/// * `user_id` - アカウントID
/// * `secret` - JWTシークレットキー
///
/// # Returns
/// * `Ok(String)` - JWTトークン（3つのドット区切り部分）
/// * `Err(NotesError)` - 生成失敗
pub fn create_jwt(user_id: &str, secret: &str) -> Result<String, NotesError> {
    let expiration = Utc::now()
        .checked_add_signed(chrono::Duration::hours(JWT_EXPIRATION_HOURS))
        .ok_or_else(|| NotesError::Jwt("Failed to calculate expiration time".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| NotesError::Jwt(format!("Failed to create JWT: {}", e)))
}

/// JWTトークンを検証
///
/// # Arguments
/// * `token` - 検証するJWTトークン
/// * `secret` - JWTシークレットキー
///
/// # Returns
/// * `Ok(Claims)` - 検証済みクレーム
/// * `Err(NotesError)` - 検証失敗（無効なトークン、期限切れなど）
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, NotesError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| NotesError::InvalidToken(format!("Failed to verify JWT: {}", e)))
}
