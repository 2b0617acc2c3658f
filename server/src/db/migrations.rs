//! データベースマイグレーション実行

use notes_common::error::NotesError;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};

/// SQLiteデータベース接続プールを作成してマイグレーションを実行
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite:data/notes.db"）
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(NotesError)` - 初期化失敗
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, NotesError> {
    // データベースファイルが存在しない場合は作成
    if !Sqlite::database_exists(database_url)
        .await
        .map_err(|e| NotesError::Database(format!("Failed to check database: {}", e)))?
    {
        tracing::info!("Creating database: {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| NotesError::Database(format!("Failed to create database: {}", e)))?;
    }

    // 接続プールを作成
    let pool = SqlitePool::connect(database_url)
        .await
        .map_err(|e| NotesError::Database(format!("Failed to connect to database: {}", e)))?;

    // マイグレーションを実行
    run_migrations(&pool).await?;

    Ok(pool)
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(())` - マイグレーション成功
/// * `Err(NotesError)` - マイグレーション失敗
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), NotesError> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| NotesError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
