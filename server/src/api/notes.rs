//! ノートCRUDエンドポイント
//!
//! すべてのハンドラーはJWT認証ミドルウェアの背後にあり、
//! リクエスト拡張からClaimsを受け取る。操作は常に認証済み
//! アカウントのノートにスコープされる。

use crate::db::notes;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use notes_common::auth::Claims;
use notes_common::error::NotesError;
use notes_common::types::Note;
use serde::Deserialize;
use serde_json::{json, Value};

/// ノート作成・更新リクエスト
#[derive(Debug, Deserialize)]
pub struct NotePayload {
    /// タイトル
    #[serde(default)]
    pub title: String,
    /// 本文
    #[serde(default)]
    pub content: String,
}

/// 一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 部分一致フィルター
    pub search: Option<String>,
}

fn validate_payload(payload: &NotePayload) -> Result<(String, String), NotesError> {
    let title = payload.title.trim().to_string();
    let content = payload.content.trim().to_string();
    if title.is_empty() || content.is_empty() {
        return Err(NotesError::Validation(
            "Title and content are required".to_string(),
        ));
    }
    Ok((title, content))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<NotePayload>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let (title, content) = validate_payload(&payload)?;
    let note = notes::create(&state.db_pool, &claims.sub, &title, &content).await?;

    tracing::info!("Note created: {} by {}", note.id, claims.sub);

    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/notes?search=...
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = notes::list(&state.db_pool, &claims.sub, query.search.as_deref()).await?;
    Ok(Json(notes))
}

/// GET /api/notes/:id
pub async fn get_note(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(note_id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    match notes::find_by_id(&state.db_pool, &claims.sub, &note_id).await? {
        Some(note) => Ok(Json(note)),
        None => Err(not_owned()),
    }
}

/// PUT /api/notes/:id
pub async fn update_note(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(note_id): Path<String>,
    Json(payload): Json<NotePayload>,
) -> Result<Json<Note>, ApiError> {
    let (title, content) = validate_payload(&payload)?;
    match notes::update(&state.db_pool, &claims.sub, &note_id, &title, &content).await? {
        Some(note) => Ok(Json(note)),
        None => Err(not_owned()),
    }
}

/// DELETE /api/notes/:id
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(note_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !notes::delete(&state.db_pool, &claims.sub, &note_id).await? {
        return Err(not_owned());
    }

    tracing::info!("Note deleted: {} by {}", note_id, claims.sub);

    Ok(Json(json!({ "message": "Note deleted successfully" })))
}

// 不在と非所有を同一の404として扱い、他アカウントのノートIDの
// 存在を漏らさない
fn not_owned() -> ApiError {
    NotesError::NotFound("Note not found or user not authorized".to_string()).into()
}
