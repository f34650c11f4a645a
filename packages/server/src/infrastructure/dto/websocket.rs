//! WebSocket event DTOs.
//!
//! Events are JSON objects tagged by a kebab-case `type` field with
//! camelCase payload fields. Client-supplied `user` objects are carried for
//! wire compatibility but never trusted: the server resolves the sender's
//! identity from the session and attaches its own `UserRef` when fanning
//! out (identity spoofing via the payload is a no-op).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User reference as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// client→server events
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    JoinWorkspace {
        workspace_slug: String,
    },
    JoinChannel {
        channel_id: String,
        #[serde(default)]
        user: Option<UserDto>,
    },
    LeaveChannel {
        channel_id: String,
        #[serde(default)]
        user: Option<UserDto>,
    },
    TypingStart {
        channel_id: String,
        #[serde(default)]
        user: Option<UserDto>,
    },
    TypingStop {
        channel_id: String,
        #[serde(default)]
        user: Option<UserDto>,
    },
    SendMessage {
        channel_id: String,
        /// The persisted message record, passed through unmodified.
        message: Value,
        #[serde(default)]
        workspace_slug: Option<String>,
    },
    MessageReaction {
        channel_id: String,
        message_id: String,
        reaction: String,
        #[serde(default)]
        user: Option<UserDto>,
    },
    PresenceChange {
        workspace_slug: String,
        status: String,
        #[serde(default)]
        user: Option<UserDto>,
    },
}

/// server→client events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    UserJoinedChannel {
        user_id: String,
        user_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_image: Option<String>,
    },
    UserLeftChannel {
        user_id: String,
        user_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_image: Option<String>,
    },
    UserTyping {
        user_id: String,
        user_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_image: Option<String>,
    },
    UserStoppedTyping {
        user_id: String,
    },
    MessageReceived {
        /// The authoritative, persisted message record.
        message: Value,
    },
    ReactionAdded {
        message_id: String,
        reaction: String,
        user: UserDto,
    },
    PresenceChange {
        user_id: String,
        status: String,
    },
}
