//! 認証・認可機能

/// JWT生成と検証
pub mod jwt;

/// 認証ミドルウェア
pub mod middleware;

/// パスワードハッシュ化と検証
pub mod password;
