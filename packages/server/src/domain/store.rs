//! MessageStore trait 定義
//!
//! 永続メッセージストアへのインターフェース。リアルタイム配信層にとって
//! ストアは外部コラボレータであり、この層自身はイベントを一切永続化しない。
//! ポーリングストリームは「現在時刻 − 固定ルックバック」より新しい行を
//! ここから読み出すだけです。

use async_trait::async_trait;
use thiserror::Error;

use super::entity::MessageRecord;
use super::value_object::{ChannelId, Timestamp};

/// メッセージストアのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("message store query failed: {0}")]
    QueryFailed(String),
    #[error("message store write failed: {0}")]
    WriteFailed(String),
}

/// MessageStore trait
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// 永続化済みメッセージを追加
    async fn append(&self, record: MessageRecord) -> Result<(), StoreError>;

    /// チャンネル内で `since` 以降（境界を含む）に作成されたメッセージを
    /// 新しい順に最大 `limit` 件取得
    async fn list_recent(
        &self,
        channel_id: &ChannelId,
        since: Timestamp,
        limit: usize,
    ) -> Result<Vec<MessageRecord>, StoreError>;
}
