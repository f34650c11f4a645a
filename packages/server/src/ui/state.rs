//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::{RoomRegistry, SessionStore};
use crate::usecase::{
    ChannelStreamUseCase, ConnectUseCase, DisconnectUseCase, JoinChannelUseCase,
    JoinWorkspaceUseCase, LeaveChannelUseCase, PersistMessageUseCase, RouteEventUseCase,
};

/// Shared application state
pub struct AppState {
    /// SessionStore（接続境界での認証に使用）
    pub session_store: Arc<dyn SessionStore>,
    /// RoomRegistry（デバッグスナップショットとシャットダウン時の clear に使用）
    pub registry: Arc<dyn RoomRegistry>,
    /// ConnectUseCase（接続受け入れのユースケース）
    pub connect_usecase: Arc<ConnectUseCase>,
    /// DisconnectUseCase（接続切断のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// JoinWorkspaceUseCase（ワークスペースルーム参加のユースケース）
    pub join_workspace_usecase: Arc<JoinWorkspaceUseCase>,
    /// JoinChannelUseCase（チャンネルルーム参加のユースケース）
    pub join_channel_usecase: Arc<JoinChannelUseCase>,
    /// LeaveChannelUseCase（チャンネルルーム離脱のユースケース）
    pub leave_channel_usecase: Arc<LeaveChannelUseCase>,
    /// RouteEventUseCase（イベントルーティングのユースケース）
    pub route_event_usecase: Arc<RouteEventUseCase>,
    /// ChannelStreamUseCase（ポーリングストリームのユースケース）
    pub channel_stream_usecase: Arc<ChannelStreamUseCase>,
    /// PersistMessageUseCase（メッセージ永続化のユースケース）
    pub persist_message_usecase: Arc<PersistMessageUseCase>,
}
