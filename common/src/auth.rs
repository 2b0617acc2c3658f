//! 認証関連のデータモデル

use serde::{Deserialize, Serialize};

/// JWTクレーム
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// アカウントID
    pub sub: String,
    /// 有効期限（Unix timestamp）
    pub exp: usize,
}
