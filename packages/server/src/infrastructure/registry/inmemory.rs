//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! ルーム→接続と接続→ルームの双方向インデックスを 1 つの Mutex の下で
//! 管理します。
//!
//! ## ロック粒度
//!
//! レジストリ全体を 1 つの `tokio::sync::Mutex` で直列化しています。
//! 切断時のクリーンアップ（全ルームからの削除）が 1 回のロック取得で
//! 完了するため、「一部のルームにだけ残っている」状態は観測不能です。
//! ルーム数が小さい前提の選択であり、ルーム単位のロックへの分割は
//! スケールアウト時の課題とします。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomKey, RoomRegistry};

#[derive(Default)]
struct RegistryIndex {
    /// ルーム → 参加中の接続
    rooms: HashMap<RoomKey, HashSet<ConnectionId>>,
    /// 接続 → 参加中のルーム
    connections: HashMap<ConnectionId, HashSet<RoomKey>>,
}

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRegistry {
    index: Mutex<RegistryIndex>,
}

impl InMemoryRoomRegistry {
    /// 新しい空のレジストリを作成
    pub fn new() -> Self {
        Self {
            index: Mutex::new(RegistryIndex::default()),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn join(&self, room: RoomKey, connection_id: ConnectionId) {
        let mut index = self.index.lock().await;
        index
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(connection_id.clone());
        index.connections.entry(connection_id).or_default().insert(room);
    }

    async fn leave(&self, room: &RoomKey, connection_id: &ConnectionId) {
        let mut index = self.index.lock().await;
        let room_now_empty = match index.rooms.get_mut(room) {
            Some(members) => {
                members.remove(connection_id);
                members.is_empty()
            }
            None => false,
        };
        // 空になったルームはキーごと消す（ルームは実体を持たない）
        if room_now_empty {
            index.rooms.remove(room);
        }

        let connection_now_empty = match index.connections.get_mut(connection_id) {
            Some(rooms) => {
                rooms.remove(room);
                rooms.is_empty()
            }
            None => false,
        };
        if connection_now_empty {
            index.connections.remove(connection_id);
        }
    }

    async fn members_of(&self, room: &RoomKey) -> Vec<ConnectionId> {
        let index = self.index.lock().await;
        index
            .rooms
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomKey> {
        let index = self.index.lock().await;
        index
            .connections
            .get(connection_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn remove_connection(&self, connection_id: &ConnectionId) -> Vec<RoomKey> {
        // 1 回のロック取得で全ルームから削除する。途中状態は観測されない。
        let mut index = self.index.lock().await;
        let rooms = index
            .connections
            .remove(connection_id)
            .unwrap_or_default();
        for room in &rooms {
            let now_empty = match index.rooms.get_mut(room) {
                Some(members) => {
                    members.remove(connection_id);
                    members.is_empty()
                }
                None => false,
            };
            if now_empty {
                index.rooms.remove(room);
            }
        }
        rooms.into_iter().collect()
    }

    async fn snapshot(&self) -> Vec<(RoomKey, Vec<ConnectionId>)> {
        let index = self.index.lock().await;
        index
            .rooms
            .iter()
            .map(|(room, members)| (room.clone(), members.iter().cloned().collect()))
            .collect()
    }

    async fn clear(&self) {
        let mut index = self.index.lock().await;
        index.rooms.clear();
        index.connections.clear();
    }
}
