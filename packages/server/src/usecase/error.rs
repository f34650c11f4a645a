//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::StoreError;

/// ルーム参加時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("user '{0}' is not a member of workspace '{1}'")]
    NotAWorkspaceMember(String, String),
    #[error("unknown channel '{0}'")]
    UnknownChannel(String),
}

/// ストリーム開始・メッセージ永続化時のアクセスエラー
///
/// 認可エラーは境界で同期的に拒否され、ルームの変更やフレームの送出より
/// 前に返る（部分適用は起こらない）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("session token is invalid or expired")]
    Unauthenticated,
    #[error("caller is not allowed to access this channel")]
    Forbidden,
}

/// メッセージ永続化のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistMessageError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("failed to persist message: {0}")]
    Store(#[from] StoreError),
}
