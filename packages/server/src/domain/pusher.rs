//! EventPusher trait 定義
//!
//! 接続へのイベント送信（push）の抽象化。WebSocket の sender 管理は
//! Infrastructure 層の実装が担います。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::value_object::ConnectionId;

/// 接続ごとの送信チャンネル
///
/// WebSocket の生成は UI 層で行われ、生成された sender がここに登録されます。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// イベント送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),
    #[error("failed to push event: {0}")]
    PushFailed(String),
}

/// EventPusher trait
///
/// ブロードキャストは常にベストエフォート。閉じた相手への送信は警告ログの上で
/// 捨てられ、呼び出し側にはエラーとして伝播しない（エフェメラルイベントに
/// 配達保証はない）。
#[async_trait]
pub trait EventPusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister(&self, connection_id: &ConnectionId);

    /// 特定の接続にイベントを送信
    async fn push_to(&self, connection_id: &ConnectionId, content: &str) -> Result<(), PushError>;

    /// 複数の接続にイベントをブロードキャストし、送信できた件数を返す
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> usize;
}
