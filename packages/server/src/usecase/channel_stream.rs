//! UseCase: ポーリングストリームの 1 tick 処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ChannelStreamUseCase::poll_once() メソッド
//! - ルックバック窓の計算（現在時刻 − 固定窓）、件数上限、時系列順への
//!   並べ替え、空 tick の無発話、ストア障害の握りつぶし
//!
//! ### なぜこのテストが必要か
//! - ポーリングストリームは接続ごとのカーソルを持たず、毎 tick 窓を
//!   計算し直す。窓の境界がずれると取りこぼしが発生する
//! - 空 tick でフレームを出すと「無」がシグナルになってしまう
//! - ストアの一時障害で tick が止まるとストリーム全体が死ぬ
//!
//! ### どのような状況を想定しているか
//! - 正常系: 窓内のメッセージが時系列順で返る
//! - エッジケース: 窓内ゼロ件（None）、上限超過（新しい側を保持）
//! - 異常系: ストアのクエリ失敗（tick スキップ、None）

use std::sync::Arc;
use std::time::Duration;

use hiroba_shared::time::Clock;

use crate::domain::{
    ChannelDirectory, ChannelId, MessageRecord, MessageStore, SessionStore, Timestamp, UserRef,
};

use super::access::authorize_channel_access;
use super::error::AccessError;

/// ポーリング周期（tick ごとにストアへ問い合わせる間隔）
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// ルックバック窓（各 tick が遡って走査する時間幅、ミリ秒）
///
/// 窓はポーリング周期より広く取ってあり、tick 間の取りこぼしを防ぐ。
/// 代わりに隣接する窓が重なるため、同じメッセージが複数の tick で
/// 出現しうる。重複排除はメッセージ ID によって消費側が行う。
pub const LOOK_BACK_MS: i64 = 5_000;

/// 1 tick で返すメッセージの最大件数
pub const POLL_BATCH_LIMIT: usize = 10;

/// ポーリングストリームのユースケース
pub struct ChannelStreamUseCase {
    /// SessionStore（認証・メンバーシップ判定の抽象化）
    sessions: Arc<dyn SessionStore>,
    /// ChannelDirectory（チャンネル→ワークスペース解決の抽象化）
    directory: Arc<dyn ChannelDirectory>,
    /// MessageStore（永続メッセージストアの抽象化）
    store: Arc<dyn MessageStore>,
    /// Clock（ルックバック窓計算用の時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl ChannelStreamUseCase {
    /// 新しい ChannelStreamUseCase を作成
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

    /// ストリーム開始時のアクセス制御（開始時に 1 回だけ評価される）
    pub async fn authorize(
        &self,
        token: &str,
        channel_id: &ChannelId,
    ) -> Result<UserRef, AccessError> {
        authorize_channel_access(
            self.sessions.as_ref(),
            self.directory.as_ref(),
            token,
            channel_id,
        )
        .await
    }

    /// 1 tick 分のポーリングを実行
    ///
    /// ルックバック窓内のメッセージを新しい順に最大 `POLL_BATCH_LIMIT` 件
    /// 取得し、時系列順に並べ替えて返す。
    ///
    /// # Returns
    ///
    /// * `Some(Vec<MessageRecord>)` - 窓内に 1 件以上あった場合（時系列順)
    /// * `None` - 窓内ゼロ件、またはストアのクエリ失敗（tick スキップ）
    pub async fn poll_once(&self, channel_id: &ChannelId) -> Option<Vec<MessageRecord>> {
        let since = Timestamp::new(self.clock.now_millis() - LOOK_BACK_MS);

        let mut batch = match self
            .store
            .list_recent(channel_id, since, POLL_BATCH_LIMIT)
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                // クエリ障害は tick をスキップするだけで、ストリームは継続する
                tracing::warn!(
                    "Poll tick failed for channel '{}': {}",
                    channel_id.as_str(),
                    e
                );
                return None;
            }
        };

        if batch.is_empty() {
            return None;
        }

        // 新しい順 → 時系列順
        batch.reverse();
        Some(batch)
    }
}
