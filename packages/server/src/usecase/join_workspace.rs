//! UseCase: ワークスペースルームへの参加処理
//!
//! ワークスペースルームはプレゼンス変更の配信先。参加は通知を伴わない
//! （チャンネル参加と違い、ワークスペースへの出入りは誰にも知らせない）。

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomKey, RoomRegistry, SessionStore, UserId, WorkspaceSlug};

use super::error::JoinRoomError;

/// ワークスペースルーム参加のユースケース
pub struct JoinWorkspaceUseCase {
    /// RoomRegistry（ルームメンバーシップの抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// SessionStore（メンバーシップ判定の抽象化）
    sessions: Arc<dyn SessionStore>,
}

impl JoinWorkspaceUseCase {
    /// 新しい JoinWorkspaceUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { registry, sessions }
    }

    /// ワークスペースルームへの参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `user_id` - 接続の認証済みユーザー ID
    /// * `workspace` - 参加先ワークスペースのスラッグ
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        user_id: &UserId,
        workspace: &WorkspaceSlug,
    ) -> Result<(), JoinRoomError> {
        // 1. メンバーシップを判定（認可エラーはルーム変更より前に返す）
        if !self.sessions.is_workspace_member(user_id, workspace).await {
            return Err(JoinRoomError::NotAWorkspaceMember(
                user_id.as_str().to_string(),
                workspace.as_str().to_string(),
            ));
        }

        // 2. レジストリに登録（冪等）
        self.registry
            .join(RoomKey::Workspace(workspace.clone()), connection_id.clone())
            .await;

        Ok(())
    }
}
