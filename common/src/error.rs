//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Notes application error type
///
/// `Database` / `PasswordHash` / `Jwt` / `Internal` はサーバー層で
/// 汎用の500レスポンスへ変換され、詳細はログにのみ残る
#[derive(Debug, Error)]
pub enum NotesError {
    /// Validation error (client-correctable input defect)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Uniqueness violation (duplicate email or username)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Authentication failure
    ///
    /// 未知のメールアドレスとパスワード不一致を意図的に区別しない
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or malformed Authorization header
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Token signature, expiry, or payload verification failed
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Missing or not-owned resource
    ///
    /// 他ユーザー所有と不存在を意図的に区別しない
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Password hash error
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// JWT error
    #[error("JWT error: {0}")]
    Jwt(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias
pub type NotesResult<T> = Result<T, NotesError>;
