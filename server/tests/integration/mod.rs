//! 統合テストモジュール

mod test_auth_flow;
mod test_profile_api;
