//! UseCase 層
//!
//! リアルタイム配信の各操作を 1 ユースケース 1 構造体で実装します。
//! 依存はすべてドメイン層の trait（`Arc<dyn ...>`）としてコンストラクタで
//! 注入されます。

pub mod access;
pub mod channel_stream;
pub mod connect;
pub mod disconnect;
pub mod error;
pub mod join_channel;
pub mod join_workspace;
pub mod leave_channel;
pub mod persist_message;
pub mod route_event;

pub use access::authorize_channel_access;
pub use channel_stream::{
    ChannelStreamUseCase, LOOK_BACK_MS, POLL_BATCH_LIMIT, POLL_INTERVAL,
};
pub use connect::ConnectUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{AccessError, JoinRoomError, PersistMessageError};
pub use join_channel::JoinChannelUseCase;
pub use join_workspace::JoinWorkspaceUseCase;
pub use leave_channel::LeaveChannelUseCase;
pub use persist_message::PersistMessageUseCase;
pub use route_event::RouteEventUseCase;
