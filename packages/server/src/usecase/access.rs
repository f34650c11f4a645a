//! チャンネルアクセスの認可ゲート
//!
//! ポーリングストリームの開始時とメッセージ永続化時に共通のゲート。
//! トークン認証 → チャンネルの所属ワークスペース解決 → メンバーシップ判定
//! の順に評価し、どこかで失敗したら即座に拒否します。
//!
//! 未知のチャンネルは Forbidden に落とします（チャンネルの存在を
//! 非メンバーに漏らさない）。

use crate::domain::{ChannelDirectory, ChannelId, SessionStore, UserRef};

use super::error::AccessError;

/// チャンネルへのアクセスを認可し、認証済みユーザーを返す
pub async fn authorize_channel_access(
    sessions: &dyn SessionStore,
    directory: &dyn ChannelDirectory,
    token: &str,
    channel_id: &ChannelId,
) -> Result<UserRef, AccessError> {
    // 1. トークンから認証済みユーザーを解決
    let user = sessions
        .authenticate(token)
        .await
        .map_err(|_| AccessError::Unauthenticated)?;

    // 2. チャンネルの所属ワークスペースを解決
    let workspace = directory
        .workspace_of(channel_id)
        .await
        .ok_or(AccessError::Forbidden)?;

    // 3. ワークスペースメンバーシップを判定
    if !sessions.is_workspace_member(&user.id, &workspace).await {
        return Err(AccessError::Forbidden);
    }

    Ok(user)
}
