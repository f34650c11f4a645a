//! ドメイン層
//!
//! リアルタイム配信のドメインモデル（値オブジェクト・エンティティ）と、
//! Infrastructure 層が実装するインターフェース（trait）を定義します。
//! UseCase 層はこのモジュールの trait にのみ依存します（依存性の逆転）。

pub mod auth;
pub mod entity;
pub mod permission;
pub mod pusher;
pub mod registry;
pub mod store;
pub mod value_object;

pub use auth::{AuthError, ChannelDirectory, SessionStore};
pub use entity::{MessageRecord, UserRef};
pub use permission::{DEFAULT_CHANNEL_NAME, Role, can_delete_channel, can_rename_channel};
pub use pusher::{EventPusher, PushError, PusherChannel};
pub use registry::RoomRegistry;
pub use store::{MessageStore, StoreError};
pub use value_object::{
    ChannelId, ConnectionId, PresenceStatus, RoomKey, Timestamp, UserId, ValidationError,
    WorkspaceSlug,
};
