//! ノートCRUD操作
//!
//! すべての読み取り・更新・削除は所有者IDでスコープされる。
//! 所有者が一致しないノートは存在しないものとして扱う。

use chrono::{DateTime, Utc};
use notes_common::error::NotesError;
use notes_common::types::Note;
use sqlx::SqlitePool;
use uuid::Uuid;

/// ノートを作成
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `user_id` - 所有者のアカウントID
/// * `title` - タイトル（トリム済み、非空）
/// * `content` - 本文（トリム済み、非空）
///
/// # Returns
/// * `Ok(Note)` - 作成されたノート
/// * `Err(NotesError)` - 作成失敗
pub async fn create(
    pool: &SqlitePool,
    user_id: &str,
    title: &str,
    content: &str,
) -> Result<Note, NotesError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO notes (id, user_id, title, content, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(user_id)
    .bind(title)
    .bind(content)
    .bind(now.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| NotesError::Database(format!("Failed to create note: {}", e)))?;

    Ok(Note {
        id,
        user_id: Uuid::parse_str(user_id)
            .map_err(|e| NotesError::Database(format!("Invalid owner id: {}", e)))?,
        title: title.to_string(),
        content: content.to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// 所有ノートの一覧を取得（新しい順）
///
/// 作成日時の降順、同時刻は挿入順の逆（後に挿入した方が先）。
/// `search` が指定された場合、タイトルまたは本文に部分一致する
/// ノートのみを返す（大文字小文字を区別しない）。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `user_id` - 所有者のアカウントID
/// * `search` - 部分一致フィルター（Noneまたは空文字で全件）
///
/// # Returns
/// * `Ok(Vec<Note>)` - ノート一覧
/// * `Err(NotesError)` - 取得失敗
pub async fn list(
    pool: &SqlitePool,
    user_id: &str,
    search: Option<&str>,
) -> Result<Vec<Note>, NotesError> {
    let rows = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(term) => {
            let pattern = format!("%{}%", escape_like(term));
            sqlx::query_as::<_, NoteRow>(
                "SELECT id, user_id, title, content, created_at, updated_at FROM notes
                 WHERE user_id = ? AND (title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\')
                 ORDER BY created_at DESC, seq DESC",
            )
            .bind(user_id)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, NoteRow>(
                "SELECT id, user_id, title, content, created_at, updated_at FROM notes
                 WHERE user_id = ?
                 ORDER BY created_at DESC, seq DESC",
            )
            .bind(user_id)
            .fetch_all(pool)
            .await
        }
    }
    .map_err(|e| NotesError::Database(format!("Failed to list notes: {}", e)))?;

    Ok(rows.into_iter().map(|r| r.into_note()).collect())
}

/// IDでノートを検索（所有者スコープ）
///
/// # Returns
/// * `Ok(Some(Note))` - ノートが見つかった
/// * `Ok(None)` - ノートが存在しない、または所有者が一致しない
/// * `Err(NotesError)` - 検索失敗
pub async fn find_by_id(
    pool: &SqlitePool,
    user_id: &str,
    note_id: &str,
) -> Result<Option<Note>, NotesError> {
    let row = sqlx::query_as::<_, NoteRow>(
        "SELECT id, user_id, title, content, created_at, updated_at FROM notes
         WHERE id = ? AND user_id = ?",
    )
    .bind(note_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| NotesError::Database(format!("Failed to find note: {}", e)))?;

    Ok(row.map(|r| r.into_note()))
}

/// ノートを更新（所有者スコープのfind-and-update）
///
/// # Returns
/// * `Ok(Some(Note))` - 更新後のノート
/// * `Ok(None)` - ノートが存在しない、または所有者が一致しない
/// * `Err(NotesError)` - 更新失敗
pub async fn update(
    pool: &SqlitePool,
    user_id: &str,
    note_id: &str,
    title: &str,
    content: &str,
) -> Result<Option<Note>, NotesError> {
    let now = Utc::now();

    let result = sqlx::query(
        "UPDATE notes SET title = ?, content = ?, updated_at = ? WHERE id = ? AND user_id = ?",
    )
    .bind(title)
    .bind(content)
    .bind(now.to_rfc3339())
    .bind(note_id)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| NotesError::Database(format!("Failed to update note: {}", e)))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_by_id(pool, user_id, note_id).await
}

/// ノートを削除（所有者スコープのfind-and-delete）
///
/// # Returns
/// * `Ok(true)` - 削除成功
/// * `Ok(false)` - ノートが存在しない、または所有者が一致しない
/// * `Err(NotesError)` - 削除失敗
pub async fn delete(pool: &SqlitePool, user_id: &str, note_id: &str) -> Result<bool, NotesError> {
    let result = sqlx::query("DELETE FROM notes WHERE id = ? AND user_id = ?")
        .bind(note_id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| NotesError::Database(format!("Failed to delete note: {}", e)))?;

    Ok(result.rows_affected() > 0)
}

/// LIKEパターンのメタ文字をエスケープする
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct NoteRow {
    id: String,
    user_id: String,
    title: String,
    content: String,
    created_at: String,
    updated_at: String,
}

impl NoteRow {
    fn into_note(self) -> Note {
        Note {
            id: Uuid::parse_str(&self.id).unwrap(),
            user_id: Uuid::parse_str(&self.user_id).unwrap(),
            title: self.title,
            content: self.content,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)
                .unwrap()
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&self.updated_at)
                .unwrap()
                .with_timezone(&Utc),
        }
    }
}
