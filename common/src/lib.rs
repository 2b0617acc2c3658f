//! Notes App Common Library
//!
//! 共通型定義、認証クレーム、エラー型を提供

#![warn(missing_docs)]

/// 共通型定義
pub mod types;

/// 認証関連のデータモデル
pub mod auth;

/// エラー型定義
pub mod error;
