//! UseCase: 接続の切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - 切断時の全ルームからの原子的な削除と sender の登録解除
//!
//! ### なぜこのテストが必要か
//! - 切断後に一部のルームにだけ残っていると、以後のファンアウトが
//!   閉じた接続に向かい続ける
//! - 切断は無通知（クラッシュしたクライアントは leave の意思表示が
//!   できないため、join/leave と違い誰にも通知しない）という仕様の保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: 複数ルームに参加中の接続の切断
//! - エッジケース: どのルームにも参加していない接続の切断

use std::sync::Arc;

use crate::domain::{ConnectionId, EventPusher, RoomKey, RoomRegistry};

/// 接続切断のユースケース
pub struct DisconnectUseCase {
    /// RoomRegistry（ルームメンバーシップの抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// EventPusher（イベント通知の抽象化）
    pusher: Arc<dyn EventPusher>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, pusher: Arc<dyn EventPusher>) -> Self {
        Self { registry, pusher }
    }

    /// 接続切断を実行
    ///
    /// 全ルームからの削除は 1 ステップで行われ、切断は誰にも通知されない。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断する接続の ID
    ///
    /// # Returns
    ///
    /// 離脱したルームのリスト（ログ用）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<RoomKey> {
        // 1. 全ルームから原子的に削除
        let rooms_left = self.registry.remove_connection(connection_id).await;

        // 2. EventPusher から登録解除
        self.pusher.unregister(connection_id).await;

        rooms_left
    }
}
