//! UseCase: チャンネルルームへの参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChannelUseCase::execute() メソッド
//! - 参加時の認可（チャンネル解決とメンバーシップ判定）と、
//!   既存メンバーへの join 通知（参加者自身を除く）
//!
//! ### なぜこのテストが必要か
//! - join 通知は「参加したことを他のメンバーに知らせる」ものであり、
//!   参加者自身に届くと自己確認フレームになってしまう
//! - 認可エラー時にルームが変更されないこと（部分適用なし）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: 既存メンバーがいるチャンネルへの参加
//! - 冪等性: 参加済みの接続が再度 join しても通知が重複しない
//! - 異常系: 非メンバー／未知チャンネルでの参加試行

use std::sync::Arc;

use crate::domain::{
    ChannelDirectory, ChannelId, ConnectionId, EventPusher, RoomKey, RoomRegistry, SessionStore,
    UserId,
};

use super::error::JoinRoomError;

/// チャンネルルーム参加のユースケース
pub struct JoinChannelUseCase {
    /// RoomRegistry（ルームメンバーシップの抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// EventPusher（イベント通知の抽象化）
    pusher: Arc<dyn EventPusher>,
    /// SessionStore（メンバーシップ判定の抽象化）
    sessions: Arc<dyn SessionStore>,
    /// ChannelDirectory（チャンネル→ワークスペース解決の抽象化）
    directory: Arc<dyn ChannelDirectory>,
}

impl JoinChannelUseCase {
    /// 新しい JoinChannelUseCase を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn EventPusher>,
        sessions: Arc<dyn SessionStore>,
        directory: Arc<dyn ChannelDirectory>,
    ) -> Self {
        Self {
            registry,
            pusher,
            sessions,
            directory,
        }
    }

    /// チャンネルルームへの参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `user_id` - 接続の認証済みユーザー ID
    /// * `channel_id` - 参加先チャンネルの ID
    /// * `notify_json` - 既存メンバーに送る user-joined-channel イベント（JSON）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 通知した既存メンバーのリスト
    /// * `Err(JoinRoomError)` - 参加失敗（ルームは変更されない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        user_id: &UserId,
        channel_id: &ChannelId,
        notify_json: &str,
    ) -> Result<Vec<ConnectionId>, JoinRoomError> {
        // 1. チャンネルの所属ワークスペースを解決
        let workspace = self
            .directory
            .workspace_of(channel_id)
            .await
            .ok_or_else(|| JoinRoomError::UnknownChannel(channel_id.as_str().to_string()))?;

        // 2. メンバーシップを判定
        if !self.sessions.is_workspace_member(user_id, &workspace).await {
            return Err(JoinRoomError::NotAWorkspaceMember(
                user_id.as_str().to_string(),
                workspace.as_str().to_string(),
            ));
        }

        // 3. 参加前の既存メンバーを取得（参加済みなら no-op、通知もしない）
        let room = RoomKey::Channel(channel_id.clone());
        let existing = self.registry.members_of(&room).await;
        if existing.contains(connection_id) {
            return Ok(vec![]);
        }

        // 4. レジストリに登録
        self.registry.join(room, connection_id.clone()).await;

        // 5. 既存メンバーにのみ join を通知（参加者自身には送らない）
        if !existing.is_empty() {
            self.pusher.broadcast(existing.clone(), notify_json).await;
        }

        Ok(existing)
    }
}
