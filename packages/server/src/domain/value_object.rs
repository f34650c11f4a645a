//! 値オブジェクト定義
//!
//! リアルタイム配信層で使う識別子・タイムスタンプ等の値オブジェクト。
//! 文字列系の ID は `TryFrom<String>` でバリデーションを通してのみ生成できます。

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// 値オブジェクトのバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} exceeds maximum length of {1}")]
    TooLong(&'static str, usize),
    #[error("workspace slug may only contain lowercase alphanumerics and '-': '{0}'")]
    InvalidSlug(String),
}

/// Opaque identifier of one open connection. Unique per socket, never reused
/// across reconnects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Allocate a fresh connection id for a new handshake.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

const MAX_ID_LEN: usize = 128;
const MAX_SLUG_LEN: usize = 64;

/// 認証済みユーザーの ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ValidationError::Empty("user id"));
        }
        if value.len() > MAX_ID_LEN {
            return Err(ValidationError::TooLong("user id", MAX_ID_LEN));
        }
        Ok(Self(value))
    }
}

/// チャンネルの ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ChannelId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ValidationError::Empty("channel id"));
        }
        if value.len() > MAX_ID_LEN {
            return Err(ValidationError::TooLong("channel id", MAX_ID_LEN));
        }
        Ok(Self(value))
    }
}

/// ワークスペースのスラッグ（URL 用識別子）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceSlug(String);

impl WorkspaceSlug {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for WorkspaceSlug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ValidationError::Empty("workspace slug"));
        }
        if value.len() > MAX_SLUG_LEN {
            return Err(ValidationError::TooLong("workspace slug", MAX_SLUG_LEN));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(ValidationError::InvalidSlug(value));
        }
        Ok(Self(value))
    }
}

/// UTC Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// プレゼンス状態
///
/// クライアントが申告した状態文字列は固定の列挙に正規化されます。
/// 未知の値は offline 扱いです。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Offline,
}

impl PresenceStatus {
    /// Normalize a client-supplied status string to the fixed enumeration.
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "online" => Self::Online,
            _ => Self::Offline,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// ブロードキャストドメイン（ルーム）のキー
///
/// ルームはレジストリ上のキーに過ぎず、参加者がゼロになれば消える。
/// 永続的な実体は持たない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomKey {
    /// ワークスペース全体のルーム（`workspace-<slug>`）
    Workspace(WorkspaceSlug),
    /// チャンネル閲覧者のルーム（`channel-<id>`）
    Channel(ChannelId),
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workspace(slug) => write!(f, "workspace-{}", slug.as_str()),
            Self::Channel(id) => write!(f, "channel-{}", id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_is_unique() {
        // テスト項目: 生成される ConnectionId が一意である
        // given (前提条件):

        // when (操作):
        let id1 = ConnectionId::generate();
        let id2 = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_user_id_rejects_empty_string() {
        // テスト項目: 空文字列の UserId が拒否される
        // given (前提条件):
        let raw = String::new();

        // when (操作):
        let result = UserId::try_from(raw);

        // then (期待する結果):
        assert_eq!(result, Err(ValidationError::Empty("user id")));
    }

    #[test]
    fn test_channel_id_accepts_plain_string() {
        // テスト項目: 通常の文字列から ChannelId を生成できる
        // given (前提条件):
        let raw = "c1".to_string();

        // when (操作):
        let result = ChannelId::try_from(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "c1");
    }

    #[test]
    fn test_workspace_slug_rejects_invalid_characters() {
        // テスト項目: スラッグに使えない文字が拒否される
        // given (前提条件):
        let cases = ["Acme", "acme corp", "acme_corp"];

        for raw in cases {
            // when (操作):
            let result = WorkspaceSlug::try_from(raw.to_string());

            // then (期待する結果):
            assert!(result.is_err(), "slug '{}' should be rejected", raw);
        }
    }

    #[test]
    fn test_workspace_slug_accepts_lowercase_with_dashes() {
        // テスト項目: 小文字英数とハイフンのみのスラッグが受理される
        // given (前提条件):
        let raw = "acme-hq-2".to_string();

        // when (操作):
        let result = WorkspaceSlug::try_from(raw);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "acme-hq-2");
    }

    #[test]
    fn test_presence_status_normalizes_unknown_to_offline() {
        // テスト項目: 未知のプレゼンス文字列が offline に正規化される
        // given (前提条件):
        let cases = [("online", PresenceStatus::Online), ("offline", PresenceStatus::Offline), ("away", PresenceStatus::Offline), ("", PresenceStatus::Offline)];

        for (raw, expected) in cases {
            // when (操作):
            let result = PresenceStatus::normalize(raw);

            // then (期待する結果):
            assert_eq!(result, expected, "status '{}'", raw);
        }
    }

    #[test]
    fn test_room_key_display_format() {
        // テスト項目: RoomKey が規定の文字列形式で表示される
        // given (前提条件):
        let workspace = RoomKey::Workspace(WorkspaceSlug::try_from("acme".to_string()).unwrap());
        let channel = RoomKey::Channel(ChannelId::try_from("c1".to_string()).unwrap());

        // when (操作) / then (期待する結果):
        assert_eq!(workspace.to_string(), "workspace-acme");
        assert_eq!(channel.to_string(), "channel-c1");
    }
}
