//! UseCase: 接続の受け入れ処理
//!
//! ハンドシェイク済みの接続に ID を割り当てた UI 層から呼ばれ、
//! 送信チャンネルを EventPusher に登録します。ルームへの副作用はありません
//! （ルーム参加はクライアントが明示的に join イベントを送る）。

use std::sync::Arc;

use crate::domain::{ConnectionId, EventPusher, PusherChannel};

/// 接続受け入れのユースケース
pub struct ConnectUseCase {
    /// EventPusher（イベント通知の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl ConnectUseCase {
    /// 新しい ConnectUseCase を作成
    pub fn new(pusher: Arc<dyn EventPusher>) -> Self {
        Self { pusher }
    }

    /// 接続を受け入れる
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 新規接続の ID
    /// * `sender` - この接続へのイベント送信用チャンネル
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.pusher.register(connection_id.clone(), sender).await;
        tracing::info!("Connection '{}' registered", connection_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::pusher::WebSocketEventPusher;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_registers_pusher_channel() {
        // テスト項目: 接続受け入れ後、その接続にイベントを送信できる
        // given (前提条件):
        let pusher = Arc::new(WebSocketEventPusher::new());
        let usecase = ConnectUseCase::new(pusher.clone());
        let conn = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        usecase.execute(conn.clone(), tx).await;

        // then (期待する結果):
        pusher.push_to(&conn, "hello").await.unwrap();
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }
}
