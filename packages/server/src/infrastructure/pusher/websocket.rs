//! WebSocket を使った EventPusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - 接続へのイベント送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、イベント送信に使用します。
//!
//! これにより、「WebSocket の生成」と「イベントの送信」が分離されます：
//! - UI 層: WebSocket 接続の受付、sender の生成
//! - Infrastructure 層: sender の管理、イベント送信

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, EventPusher, PushError, PusherChannel};

/// WebSocket を使った EventPusher 実装
pub struct WebSocketEventPusher {
    /// 接続中の connection_id と対応する WebSocket sender のマップ
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketEventPusher {
    /// 新しい WebSocketEventPusher を作成
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketEventPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPusher for WebSocketEventPusher {
    async fn register(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection_id.clone(), sender);
        tracing::debug!("Connection '{}' registered to EventPusher", connection_id);
    }

    async fn unregister(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
        tracing::debug!("Connection '{}' unregistered from EventPusher", connection_id);
    }

    async fn push_to(&self, connection_id: &ConnectionId, content: &str) -> Result<(), PushError> {
        let connections = self.connections.lock().await;

        if let Some(sender) = connections.get(connection_id) {
            sender
                .send(content.to_string())
                .map_err(|e| PushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed event to connection '{}'", connection_id);
            Ok(())
        } else {
            Err(PushError::ConnectionNotFound(connection_id.to_string()))
        }
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> usize {
        let connections = self.connections.lock().await;

        let mut delivered = 0;
        for target in targets {
            if let Some(sender) = connections.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push event to connection '{}': {}", target, e);
                } else {
                    delivered += 1;
                }
            } else {
                tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target
                );
            }
        }

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketEventPusher の基本的なイベント送信機能
    // - push_to: 特定の接続への送信
    // - broadcast: 複数接続への送信と送達件数
    // - エラーハンドリング（存在しない接続、閉じたチャンネル）
    //
    // 【なぜこのテストが必要か】
    // - EventPusher は UseCase から呼ばれる配信層の中核
    // - ブロードキャストの部分失敗が呼び出し側に波及しないことを保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功ケース
    // 2. push_to の失敗ケース（接続が存在しない）
    // 3. broadcast の成功ケース（複数接続、送達件数）
    // 4. broadcast の部分失敗ケース（未登録の接続、閉じた受信側）
    // ========================================

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にイベントを送信できる
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = ConnectionId::generate();
        pusher.register(conn.clone(), tx).await;

        // when (操作):
        let result = pusher.push_to(&conn, "hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_connection_not_found() {
        // テスト項目: 存在しない接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let unknown = ConnectionId::generate();

        // when (操作):
        let result = pusher.push_to(&unknown, "hello").await;

        // then (期待する結果):
        assert!(matches!(
            result.unwrap_err(),
            PushError::ConnectionNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_broadcast_delivers_to_all_targets() {
        // テスト項目: 複数の接続にブロードキャストでき、送達件数が返る
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        pusher.register(alice.clone(), tx1).await;
        pusher.register(bob.clone(), tx2).await;

        // when (操作):
        let delivered = pusher.broadcast(vec![alice, bob], "broadcast").await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(rx1.recv().await, Some("broadcast".to_string()));
        assert_eq!(rx2.recv().await, Some("broadcast".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_missing_connections() {
        // テスト項目: 未登録の接続が混ざっていてもブロードキャストは続行される
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        let gone = ConnectionId::generate();
        pusher.register(alice.clone(), tx).await;

        // when (操作):
        let delivered = pusher.broadcast(vec![alice, gone], "broadcast").await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(rx.recv().await, Some("broadcast".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_closed_receiver() {
        // テスト項目: 受信側が閉じた接続への送信は握りつぶされる
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx); // クライアント切断相当
        let alice = ConnectionId::generate();
        pusher.register(alice.clone(), tx).await;

        // when (操作):
        let delivered = pusher.broadcast(vec![alice], "broadcast").await;

        // then (期待する結果): 送達 0 件だがエラーにはならない
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでも問題なく処理される
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();

        // when (操作):
        let delivered = pusher.broadcast(vec![], "event").await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_unregister_removes_connection() {
        // テスト項目: unregister した接続には push_to できなくなる
        // given (前提条件):
        let pusher = WebSocketEventPusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let conn = ConnectionId::generate();
        pusher.register(conn.clone(), tx).await;

        // when (操作):
        pusher.unregister(&conn).await;

        // then (期待する結果):
        assert!(pusher.push_to(&conn, "hello").await.is_err());
    }
}
