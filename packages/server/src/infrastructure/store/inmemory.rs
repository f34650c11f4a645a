//! InMemory Message Store 実装
//!
//! ドメイン層が定義する MessageStore trait の具体的な実装。
//! Vec をインメモリ DB として使用します。
//!
//! ## 技術的負債
//!
//! 永続メッセージストアは本来この層の外部コラボレータ（DBMS）です。
//! このインメモリ実装はシングルプロセス運用とテストのための妥協であり、
//! PostgreSQL などの DBMS 実装時には以下の変換層が必要になります：
//!
//! ```text
//! DB Row → MessageRecord (ドメインモデル)
//! ```

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChannelId, MessageRecord, MessageStore, StoreError, Timestamp};

/// インメモリ Message Store 実装
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<MessageRecord>>,
}

impl InMemoryMessageStore {
    /// 新しい空の InMemoryMessageStore を作成
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, record: MessageRecord) -> Result<(), StoreError> {
        let mut messages = self.messages.lock().await;
        messages.push(record);
        Ok(())
    }

    async fn list_recent(
        &self,
        channel_id: &ChannelId,
        since: Timestamp,
        limit: usize,
    ) -> Result<Vec<MessageRecord>, StoreError> {
        let messages = self.messages.lock().await;
        let mut matching: Vec<MessageRecord> = messages
            .iter()
            .filter(|m| &m.channel_id == channel_id && m.created_at >= since)
            .cloned()
            .collect();
        // 新しい順に並べて limit 件に切り詰める
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit);
        Ok(matching)
    }
}
