//! セッション・チャンネル解決の trait 定義
//!
//! セッション／アイデンティティプロバイダとチャンネルディレクトリは
//! 外部コラボレータ。ゲートウェイは認証済みユーザーとワークスペース
//! メンバーシップをここから受け取るだけで、認証方式自体には関与しない。

use async_trait::async_trait;
use thiserror::Error;

use super::entity::UserRef;
use super::value_object::{ChannelId, UserId, WorkspaceSlug};

/// 認証エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("session token is invalid or expired")]
    InvalidToken,
}

/// SessionStore trait
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// セッショントークンから認証済みユーザーを解決
    async fn authenticate(&self, token: &str) -> Result<UserRef, AuthError>;

    /// ユーザーがワークスペースのメンバーかどうかを判定
    async fn is_workspace_member(&self, user_id: &UserId, workspace: &WorkspaceSlug) -> bool;
}

/// ChannelDirectory trait
///
/// チャンネル ID からそのチャンネルを所有するワークスペースを引く。
/// ストリームの開始時アクセス制御（ワークスペースメンバーのみ購読可）に使う。
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// チャンネルの所属ワークスペースを取得（未知のチャンネルは None）
    async fn workspace_of(&self, channel_id: &ChannelId) -> Option<WorkspaceSlug>;
}
