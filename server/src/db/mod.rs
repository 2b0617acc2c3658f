//! データベースアクセス
//!
//! SQLxクエリ、マイグレーション

/// マイグレーション実行
pub mod migrations;

/// ノートCRUD操作
pub mod notes;

/// ユーザーCRUD操作
pub mod users;
