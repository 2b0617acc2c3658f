//! Notes App Server
//!
//! ユーザー認証とノートCRUDを提供するREST APIサーバー

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// 認証・認可機能
pub mod auth;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// データベースアクセス
pub mod db;

/// エラー→HTTPレスポンス変換
pub mod error;

/// JWT秘密鍵管理
pub mod jwt_secret;

/// ロギング初期化ユーティリティ
pub mod logging;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// JWT秘密鍵
    pub jwt_secret: String,
    /// アバター画像の保存先ディレクトリ
    pub uploads_dir: std::path::PathBuf,
}
