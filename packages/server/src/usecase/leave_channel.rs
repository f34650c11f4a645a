//! UseCase: チャンネルルームからの離脱処理
//!
//! 明示的な leave は join を鏡写しにした操作で、残ったメンバーに
//! user-left-channel を通知する。切断（disconnect）と違い、leave は
//! クライアントの明確な意思表示なので通知を伴う。

use std::sync::Arc;

use crate::domain::{ChannelId, ConnectionId, EventPusher, RoomKey, RoomRegistry};

/// チャンネルルーム離脱のユースケース
pub struct LeaveChannelUseCase {
    /// RoomRegistry（ルームメンバーシップの抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// EventPusher（イベント通知の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl LeaveChannelUseCase {
    /// 新しい LeaveChannelUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// チャンネルルームからの離脱を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 離脱する接続の ID
    /// * `channel_id` - 離脱するチャンネルの ID
    /// * `notify_json` - 残ったメンバーに送る user-left-channel イベント（JSON）
    ///
    /// # Returns
    ///
    /// 通知した残りメンバーのリスト（非メンバーの leave は no-op で空を返す）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        channel_id: &ChannelId,
        notify_json: &str,
    ) -> Vec<ConnectionId> {
        let room = RoomKey::Channel(channel_id.clone());

        // 非メンバーの leave は no-op（通知もしない）
        let members = self.registry.members_of(&room).await;
        if !members.contains(connection_id) {
            return vec![];
        }

        self.registry.leave(&room, connection_id).await;

        // 残ったメンバーに通知
        let remaining = self.registry.members_of(&room).await;
        if !remaining.is_empty() {
            self.pusher.broadcast(remaining.clone(), notify_json).await;
        }

        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::pusher::WebSocketEventPusher;
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use tokio::sync::mpsc;

    fn channel(id: &str) -> ChannelId {
        ChannelId::try_from(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_leave_notifies_remaining_members() {
        // テスト項目: 離脱時に残ったメンバーへ通知が届く
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = LeaveChannelUseCase::new(registry.clone(), pusher.clone());

        let channel_id = channel("c1");
        let room = RoomKey::Channel(channel_id.clone());
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        registry.join(room.clone(), alice.clone()).await;
        registry.join(room.clone(), bob.clone()).await;
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        pusher.register(bob.clone(), bob_tx).await;

        // when (操作): alice が離脱
        let remaining = usecase
            .execute(&alice, &channel_id, r#"{"type":"user-left-channel"}"#)
            .await;

        // then (期待する結果):
        assert_eq!(remaining, vec![bob]);
        assert_eq!(
            bob_rx.try_recv().unwrap(),
            r#"{"type":"user-left-channel"}"#
        );
        assert_eq!(registry.members_of(&room).await.len(), 1);
    }

    #[tokio::test]
    async fn test_leave_by_non_member_is_noop() {
        // テスト項目: 非メンバーの leave は no-op で通知も出ない
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = LeaveChannelUseCase::new(registry.clone(), pusher.clone());

        let channel_id = channel("c1");
        let room = RoomKey::Channel(channel_id.clone());
        let alice = ConnectionId::generate();
        let stranger = ConnectionId::generate();
        registry.join(room.clone(), alice.clone()).await;
        let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
        pusher.register(alice.clone(), alice_tx).await;

        // when (操作):
        let remaining = usecase.execute(&stranger, &channel_id, "{}").await;

        // then (期待する結果):
        assert!(remaining.is_empty());
        assert!(alice_rx.try_recv().is_err());
        assert_eq!(registry.members_of(&room).await, vec![alice]);
    }

    #[tokio::test]
    async fn test_last_member_leaving_notifies_no_one() {
        // テスト項目: 最後のメンバーの離脱では通知対象が空
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = LeaveChannelUseCase::new(registry.clone(), pusher);

        let channel_id = channel("c1");
        let room = RoomKey::Channel(channel_id.clone());
        let alice = ConnectionId::generate();
        registry.join(room.clone(), alice.clone()).await;

        // when (操作):
        let remaining = usecase.execute(&alice, &channel_id, "{}").await;

        // then (期待する結果): ルームも消えている
        assert!(remaining.is_empty());
        assert!(registry.snapshot().await.is_empty());
    }
}
