//! エラー→HTTPレスポンス変換
//!
//! すべてのハンドラー失敗はここで単一のJSONエラーボディへ変換され、
//! トランスポート層へ未処理のまま伝播することはない。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use notes_common::error::NotesError;
use serde_json::json;

/// ハンドラー境界でHTTPレスポンスへ変換されるAPIエラー
#[derive(Debug)]
pub struct ApiError(pub NotesError);

impl From<NotesError> for ApiError {
    fn from(error: NotesError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            NotesError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            NotesError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            NotesError::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "Invalid credentials".to_string())
            }
            NotesError::Unauthenticated(msg) | NotesError::InvalidToken(msg) => {
                (StatusCode::UNAUTHORIZED, msg.clone())
            }
            NotesError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            other => {
                // 内部詳細はログにのみ残し、クライアントへは汎用メッセージを返す
                tracing::error!("Internal error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
