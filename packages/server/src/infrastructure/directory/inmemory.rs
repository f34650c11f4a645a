//! InMemory Channel Directory 実装
//!
//! チャンネル → 所属ワークスペースの対応を保持するインメモリ実装。
//! 本来はチャンネルの永続レコードから引く情報です。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChannelDirectory, ChannelId, WorkspaceSlug};

/// インメモリ Channel Directory 実装
pub struct InMemoryChannelDirectory {
    channels: Mutex<HashMap<ChannelId, WorkspaceSlug>>,
}

impl InMemoryChannelDirectory {
    /// 新しい空の InMemoryChannelDirectory を作成
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// チャンネルを登録（シード・テスト用）
    pub async fn register(&self, channel_id: ChannelId, workspace: WorkspaceSlug) {
        let mut channels = self.channels.lock().await;
        channels.insert(channel_id, workspace);
    }
}

impl Default for InMemoryChannelDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelDirectory for InMemoryChannelDirectory {
    async fn workspace_of(&self, channel_id: &ChannelId) -> Option<WorkspaceSlug> {
        let channels = self.channels.lock().await;
        channels.get(channel_id).cloned()
    }
}
