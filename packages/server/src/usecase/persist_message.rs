//! UseCase: メッセージの永続化処理
//!
//! 「ストアに永続化してから配信する」境界の永続化側。リアルタイム層は
//! メッセージの正本を作らないため、シングルプロセス構成ではこの
//! ユースケースがストアへの唯一の書き込み経路になる。

use std::sync::Arc;

use hiroba_shared::time::Clock;
use uuid::Uuid;

use crate::domain::{
    ChannelDirectory, ChannelId, MessageRecord, MessageStore, SessionStore, Timestamp,
};

use super::access::authorize_channel_access;
use super::error::PersistMessageError;

/// メッセージ永続化のユースケース
pub struct PersistMessageUseCase {
    /// SessionStore（認証・メンバーシップ判定の抽象化）
    sessions: Arc<dyn SessionStore>,
    /// ChannelDirectory（チャンネル→ワークスペース解決の抽象化）
    directory: Arc<dyn ChannelDirectory>,
    /// MessageStore（永続メッセージストアの抽象化）
    store: Arc<dyn MessageStore>,
    /// Clock（作成時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl PersistMessageUseCase {
    /// 新しい PersistMessageUseCase を作成
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        directory: Arc<dyn ChannelDirectory>,
        store: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            directory,
            store,
            clock,
        }
    }

    /// メッセージを永続化し、確定済みレコードを返す
    ///
    /// # Arguments
    ///
    /// * `token` - 呼び出し元のセッショントークン
    /// * `channel_id` - 投稿先チャンネルの ID
    /// * `body` - メッセージ本文
    pub async fn execute(
        &self,
        token: &str,
        channel_id: &ChannelId,
        body: String,
    ) -> Result<MessageRecord, PersistMessageError> {
        // 1. アクセスゲート（認可エラーは書き込みより前に返す）
        let author = authorize_channel_access(
            self.sessions.as_ref(),
            self.directory.as_ref(),
            token,
            channel_id,
        )
        .await?;

        // 2. 確定済みレコードを構築して永続化
        let record = MessageRecord {
            id: Uuid::new_v4().to_string(),
            channel_id: channel_id.clone(),
            author,
            body,
            created_at: Timestamp::new(self.clock.now_millis()),
        };
        self.store.append(record.clone()).await?;

        tracing::debug!(
            "Persisted message '{}' in channel '{}'",
            record.id,
            channel_id.as_str()
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserId, UserRef, WorkspaceSlug};
    use crate::infrastructure::directory::InMemoryChannelDirectory;
    use crate::infrastructure::session::InMemorySessionStore;
    use crate::infrastructure::store::InMemoryMessageStore;
    use crate::usecase::error::AccessError;
    use hiroba_shared::time::FixedClock;

    struct Fixture {
        store: Arc<InMemoryMessageStore>,
        usecase: PersistMessageUseCase,
        channel: ChannelId,
    }

    async fn setup() -> Fixture {
        let sessions = Arc::new(InMemorySessionStore::new());
        let directory = Arc::new(InMemoryChannelDirectory::new());
        let store = Arc::new(InMemoryMessageStore::new());

        let workspace = WorkspaceSlug::try_from("acme".to_string()).unwrap();
        let channel = ChannelId::try_from("c1".to_string()).unwrap();
        directory.register(channel.clone(), workspace.clone()).await;

        let alice = UserId::try_from("alice".to_string()).unwrap();
        sessions
            .insert_session("alice-token", UserRef::new(alice.clone(), "Alice", None))
            .await;
        sessions.add_member(workspace, alice).await;

        let usecase = PersistMessageUseCase::new(
            sessions,
            directory,
            store.clone(),
            Arc::new(FixedClock::new(42_000)),
        );
        Fixture {
            store,
            usecase,
            channel,
        }
    }

    #[tokio::test]
    async fn test_persist_message_success() {
        // テスト項目: メンバーのメッセージが永続化され、確定レコードが返る
        // given (前提条件):
        let f = setup().await;

        // when (操作):
        let record = f
            .usecase
            .execute("alice-token", &f.channel, "hello".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert!(!record.id.is_empty());
        assert_eq!(record.author.id.as_str(), "alice");
        assert_eq!(record.created_at.value(), 42_000);

        // ストアから読み出せる
        let stored = f
            .store
            .list_recent(&f.channel, Timestamp::new(0), 10)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, record.id);
    }

    #[tokio::test]
    async fn test_persist_message_rejected_before_write() {
        // テスト項目: 認可エラー時は何も書き込まれない
        // given (前提条件):
        let f = setup().await;

        // when (操作):
        let result = f
            .usecase
            .execute("bogus", &f.channel, "hello".to_string())
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(PersistMessageError::Access(AccessError::Unauthenticated))
        ));
        let stored = f
            .store
            .list_recent(&f.channel, Timestamp::new(0), 10)
            .await
            .unwrap();
        assert!(stored.is_empty());
    }
}
