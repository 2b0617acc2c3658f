//! ユーザーCRUD操作

use chrono::{DateTime, Utc};
use notes_common::error::NotesError;
use notes_common::types::User;
use sqlx::SqlitePool;
use uuid::Uuid;

/// ユーザーを作成
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `username` - ユーザー名（トリム済み）
/// * `email` - メールアドレス（トリム済み）
/// * `password_hash` - bcryptハッシュ化されたパスワード
///
/// # Returns
/// * `Ok(User)` - 作成されたユーザー
/// * `Err(NotesError::Conflict)` - ユーザー名またはメールアドレス重複
/// * `Err(NotesError::Database)` - その他の作成失敗
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, NotesError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, profile_image, created_at, updated_at)
         VALUES (?, ?, ?, ?, NULL, ?, ?)",
    )
    .bind(id.to_string())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(now.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(pool)
    .await
    .map_err(map_unique_violation)?;

    Ok(User {
        id,
        username: username.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        profile_image: None,
        created_at: now,
        updated_at: now,
    })
}

/// メールアドレスでユーザーを検索
///
/// # Returns
/// * `Ok(Some(User))` - ユーザーが見つかった
/// * `Ok(None)` - ユーザーが見つからなかった
/// * `Err(NotesError)` - 検索失敗
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, NotesError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, email, password_hash, profile_image, created_at, updated_at
         FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| NotesError::Database(format!("Failed to find user: {}", e)))?;

    Ok(row.map(|r| r.into_user()))
}

/// IDでユーザーを検索
///
/// # Returns
/// * `Ok(Some(User))` - ユーザーが見つかった
/// * `Ok(None)` - ユーザーが見つからなかった
/// * `Err(NotesError)` - 検索失敗
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, NotesError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, email, password_hash, profile_image, created_at, updated_at
         FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| NotesError::Database(format!("Failed to find user: {}", e)))?;

    Ok(row.map(|r| r.into_user()))
}

/// プロフィールを更新（username, email, 任意でprofile_image）
///
/// `password_hash` はこの経路では決して変更されない。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `id` - 対象ユーザーID
/// * `username` - 新しいユーザー名
/// * `email` - 新しいメールアドレス
/// * `profile_image` - `Some(path)` の場合のみ差し替え、`None` は現状維持
///
/// # Returns
/// * `Ok(Some(User))` - 更新後のユーザー
/// * `Ok(None)` - ユーザーが存在しない
/// * `Err(NotesError::Conflict)` - ユーザー名またはメールアドレス重複
pub async fn update_profile(
    pool: &SqlitePool,
    id: &str,
    username: &str,
    email: &str,
    profile_image: Option<&str>,
) -> Result<Option<User>, NotesError> {
    let current = match find_by_id(pool, id).await? {
        Some(user) => user,
        None => return Ok(None),
    };

    let new_image = match profile_image {
        Some(path) => Some(path.to_string()),
        None => current.profile_image.clone(),
    };
    let now = Utc::now();

    sqlx::query(
        "UPDATE users SET username = ?, email = ?, profile_image = ?, updated_at = ? WHERE id = ?",
    )
    .bind(username)
    .bind(email)
    .bind(&new_image)
    .bind(now.to_rfc3339())
    .bind(id)
    .execute(pool)
    .await
    .map_err(map_unique_violation)?;

    Ok(Some(User {
        id: current.id,
        username: username.to_string(),
        email: email.to_string(),
        password_hash: current.password_hash,
        profile_image: new_image,
        created_at: current.created_at,
        updated_at: now,
    }))
}

/// UNIQUE制約違反をConflictへ変換する
fn map_unique_violation(e: sqlx::Error) -> NotesError {
    let message = e.to_string();
    if message.contains("UNIQUE constraint failed") {
        if message.contains("users.email") {
            NotesError::Conflict("User with this email already exists".to_string())
        } else {
            NotesError::Conflict("User with this username already exists".to_string())
        }
    } else {
        NotesError::Database(format!("Failed to write user: {}", message))
    }
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    profile_image: Option<String>,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn into_user(self) -> User {
        let id = Uuid::parse_str(&self.id).unwrap();
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .unwrap()
            .with_timezone(&Utc);
        let updated_at = DateTime::parse_from_rfc3339(&self.updated_at)
            .unwrap()
            .with_timezone(&Utc);

        User {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            profile_image: self.profile_image,
            created_at,
            updated_at,
        }
    }
}
