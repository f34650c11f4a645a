//! UseCase: イベントルーティング（ファンアウト規則）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RouteEventUseCase の各ファンアウト規則
//! - イベント種別ごとの「送信者を含むか除くか」「対象ルーム」の違い
//!
//! ### なぜこのテストが必要か
//! - message-received は送信者にも届ける必要がある（サーバー確定版の
//!   メッセージで楽観的ローカルコピーを置き換えるため）
//! - typing / reaction / presence は他者への情報であり、送信者に返すと
//!   エコーになる
//! - 対象ルームが空のイベントは黙って捨てられる（キューも再送もしない）
//!
//! ### どのような状況を想定しているか
//! - 正常系: 各イベント種別のファンアウト
//! - エッジケース: ルームが空／送信者のみのルーム

use std::sync::Arc;

use crate::domain::{
    ChannelId, ConnectionId, EventPusher, RoomKey, RoomRegistry, WorkspaceSlug,
};

/// イベントルーティングのユースケース
///
/// 各メソッドが 1 イベント種別のファンアウト規則に対応する。ペイロードは
/// UI 層で DTO から構築済みの JSON を受け取るだけで、この層は「誰に
/// 届けるか」のみを決める。
pub struct RouteEventUseCase {
    /// RoomRegistry（ルームメンバーシップの抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// EventPusher（イベント通知の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl RouteEventUseCase {
    /// 新しい RouteEventUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// message-received をチャンネルルームの全メンバー（送信者を含む）に配信
    pub async fn broadcast_message(
        &self,
        channel_id: &ChannelId,
        json: &str,
    ) -> Vec<ConnectionId> {
        let room = RoomKey::Channel(channel_id.clone());
        self.fan_out(&room, None, json).await
    }

    /// user-typing / user-stopped-typing をチャンネルルームの送信者以外に配信
    pub async fn notify_typing(
        &self,
        sender: &ConnectionId,
        channel_id: &ChannelId,
        json: &str,
    ) -> Vec<ConnectionId> {
        let room = RoomKey::Channel(channel_id.clone());
        self.fan_out(&room, Some(sender), json).await
    }

    /// reaction-added をチャンネルルームの送信者以外に配信
    pub async fn notify_reaction(
        &self,
        sender: &ConnectionId,
        channel_id: &ChannelId,
        json: &str,
    ) -> Vec<ConnectionId> {
        let room = RoomKey::Channel(channel_id.clone());
        self.fan_out(&room, Some(sender), json).await
    }

    /// presence-change をワークスペースルームの送信者以外に配信
    pub async fn notify_presence(
        &self,
        sender: &ConnectionId,
        workspace: &WorkspaceSlug,
        json: &str,
    ) -> Vec<ConnectionId> {
        let room = RoomKey::Workspace(workspace.clone());
        self.fan_out(&room, Some(sender), json).await
    }

    /// ルームの現在のメンバーへファンアウトし、対象のリストを返す
    ///
    /// 対象が空のイベントは黙って捨てる（エフェメラルイベントに配達保証は
    /// ない）。
    async fn fan_out(
        &self,
        room: &RoomKey,
        exclude: Option<&ConnectionId>,
        json: &str,
    ) -> Vec<ConnectionId> {
        let members = self.registry.members_of(room).await;
        let targets: Vec<ConnectionId> = match exclude {
            Some(sender) => members.into_iter().filter(|c| c != sender).collect(),
            None => members,
        };

        if targets.is_empty() {
            tracing::debug!("No recipients in room '{}', event dropped", room);
            return targets;
        }

        let delivered = self.pusher.broadcast(targets.clone(), json).await;
        tracing::debug!(
            "Fanned out event to {}/{} members of room '{}'",
            delivered,
            targets.len(),
            room
        );
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::pusher::WebSocketEventPusher;
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    struct Fixture {
        registry: Arc<InMemoryRoomRegistry>,
        pusher: Arc<WebSocketEventPusher>,
        usecase: RouteEventUseCase,
    }

    fn setup() -> Fixture {
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = RouteEventUseCase::new(registry.clone(), pusher.clone());
        Fixture {
            registry,
            pusher,
            usecase,
        }
    }

    async fn member(
        f: &Fixture,
        room: &RoomKey,
    ) -> (ConnectionId, UnboundedReceiver<String>) {
        let conn = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        f.pusher.register(conn.clone(), tx).await;
        f.registry.join(room.clone(), conn.clone()).await;
        (conn, rx)
    }

    fn channel(id: &str) -> ChannelId {
        ChannelId::try_from(id.to_string()).unwrap()
    }

    fn workspace(slug: &str) -> WorkspaceSlug {
        WorkspaceSlug::try_from(slug.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_message_is_delivered_to_sender_too() {
        // テスト項目: message-received は送信者を含む全メンバーに届く
        // given (前提条件):
        let f = setup();
        let channel_id = channel("c1");
        let room = RoomKey::Channel(channel_id.clone());
        let (alice, mut alice_rx) = member(&f, &room).await;
        let (_bob, mut bob_rx) = member(&f, &room).await;

        // when (操作): alice がメッセージを送信
        let targets = f
            .usecase
            .broadcast_message(&channel_id, r#"{"type":"message-received"}"#)
            .await;

        // then (期待する結果): 両方に届く
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&alice));
        assert_eq!(
            alice_rx.try_recv().unwrap(),
            r#"{"type":"message-received"}"#
        );
        assert_eq!(bob_rx.try_recv().unwrap(), r#"{"type":"message-received"}"#);
    }

    #[tokio::test]
    async fn test_typing_is_never_delivered_to_sender() {
        // テスト項目: typing は送信者以外にのみ届く
        // given (前提条件):
        let f = setup();
        let channel_id = channel("c1");
        let room = RoomKey::Channel(channel_id.clone());
        let (alice, mut alice_rx) = member(&f, &room).await;
        let (bob, mut bob_rx) = member(&f, &room).await;

        // when (操作): alice が typing-start
        let targets = f
            .usecase
            .notify_typing(&alice, &channel_id, r#"{"type":"user-typing"}"#)
            .await;

        // then (期待する結果): bob のみ
        assert_eq!(targets, vec![bob]);
        assert!(alice_rx.try_recv().is_err());
        assert_eq!(bob_rx.try_recv().unwrap(), r#"{"type":"user-typing"}"#);
    }

    #[tokio::test]
    async fn test_reaction_excludes_sender() {
        // テスト項目: reaction-added は送信者以外にのみ届く
        // given (前提条件):
        let f = setup();
        let channel_id = channel("c1");
        let room = RoomKey::Channel(channel_id.clone());
        let (alice, mut alice_rx) = member(&f, &room).await;
        let (_bob, mut bob_rx) = member(&f, &room).await;

        // when (操作):
        f.usecase
            .notify_reaction(&alice, &channel_id, r#"{"type":"reaction-added"}"#)
            .await;

        // then (期待する結果):
        assert!(alice_rx.try_recv().is_err());
        assert_eq!(bob_rx.try_recv().unwrap(), r#"{"type":"reaction-added"}"#);
    }

    #[tokio::test]
    async fn test_presence_targets_workspace_room() {
        // テスト項目: presence-change はワークスペースルームに配信され、
        //             チャンネルルームのメンバーには届かない
        // given (前提条件):
        let f = setup();
        let slug = workspace("acme");
        let ws_room = RoomKey::Workspace(slug.clone());
        let channel_room = RoomKey::Channel(channel("c1"));
        let (alice, mut alice_rx) = member(&f, &ws_room).await;
        let (_bob, mut bob_rx) = member(&f, &ws_room).await;
        let (_carol, mut carol_rx) = member(&f, &channel_room).await;

        // when (操作): alice のプレゼンス変更
        let targets = f
            .usecase
            .notify_presence(&alice, &slug, r#"{"type":"presence-change"}"#)
            .await;

        // then (期待する結果): ワークスペースルームの bob のみ
        assert_eq!(targets.len(), 1);
        assert!(alice_rx.try_recv().is_err());
        assert_eq!(bob_rx.try_recv().unwrap(), r#"{"type":"presence-change"}"#);
        assert!(carol_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_event_to_empty_room_is_dropped() {
        // テスト項目: 対象ルームが空のイベントは黙って捨てられる
        // given (前提条件):
        let f = setup();
        let channel_id = channel("empty");

        // when (操作):
        let targets = f
            .usecase
            .broadcast_message(&channel_id, r#"{"type":"message-received"}"#)
            .await;

        // then (期待する結果):
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn test_typing_with_sender_alone_is_dropped() {
        // テスト項目: 送信者しかいないルームの typing は誰にも届かない
        // given (前提条件):
        let f = setup();
        let channel_id = channel("c1");
        let room = RoomKey::Channel(channel_id.clone());
        let (alice, mut alice_rx) = member(&f, &room).await;

        // when (操作):
        let targets = f
            .usecase
            .notify_typing(&alice, &channel_id, r#"{"type":"user-typing"}"#)
            .await;

        // then (期待する結果):
        assert!(targets.is_empty());
        assert!(alice_rx.try_recv().is_err());
    }
}
