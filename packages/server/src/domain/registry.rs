//! Room Registry trait 定義
//!
//! ルーム（ブロードキャストドメイン）と接続の対応関係を管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 契約
//!
//! - `join` は冪等（二重 join は no-op）
//! - `leave` は非メンバーに対して no-op
//! - `remove_connection` は全ルームからの削除を 1 ステップで行う。
//!   切断後に「一部のルームにだけ残っている」状態が観測されてはならない。

use async_trait::async_trait;

use super::value_object::{ConnectionId, RoomKey};

/// Room Registry trait
///
/// ルームはここでのキーに過ぎず、最初の join で暗黙に作られ、
/// メンバーがゼロになった時点で消える。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 接続をルームに参加させる（冪等）
    async fn join(&self, room: RoomKey, connection_id: ConnectionId);

    /// 接続をルームから離脱させる（非メンバーなら no-op）
    async fn leave(&self, room: &RoomKey, connection_id: &ConnectionId);

    /// ルームの現在のメンバーを取得
    async fn members_of(&self, room: &RoomKey) -> Vec<ConnectionId>;

    /// 接続が参加している全ルームを取得
    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomKey>;

    /// 接続を全ルームから原子的に削除し、離脱したルームを返す
    async fn remove_connection(&self, connection_id: &ConnectionId) -> Vec<RoomKey>;

    /// 全ルームとメンバーのスナップショットを取得（デバッグ用）
    async fn snapshot(&self) -> Vec<(RoomKey, Vec<ConnectionId>)>;

    /// レジストリを空にする（シャットダウン時のライフサイクル契約）
    async fn clear(&self);
}
