//! 共通型定義
//!
//! User, Note等のコアデータ型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// アカウント
///
/// `password_hash` を含むため、クライアントへ返す際は
/// [`PublicUser`] へ変換すること
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// 一意識別子
    pub id: Uuid,
    /// ユーザー名（トリム済み、全アカウントで一意）
    pub username: String,
    /// メールアドレス（トリム済み、全アカウントで一意）
    pub email: String,
    /// bcryptハッシュ化されたパスワード
    pub password_hash: String,
    /// プロフィール画像のパス（例: "/uploads/xxxx.png"）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// `password_hash` を除いた公開プロジェクションへ変換する
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username,
            email: self.email,
            profile_image: self.profile_image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// アカウントの公開プロジェクション（password_hash除外）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicUser {
    /// 一意識別子
    pub id: Uuid,
    /// ユーザー名
    pub username: String,
    /// メールアドレス
    pub email: String,
    /// プロフィール画像のパス
    pub profile_image: Option<String>,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}

/// ノート
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// 一意識別子
    pub id: Uuid,
    /// 所有者のアカウントID（作成後は不変）
    pub user_id: Uuid,
    /// タイトル（トリム済み、非空）
    pub title: String,
    /// 本文（トリム済み、非空）
    pub content: String,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}
