//! エンティティ定義

use super::value_object::{ChannelId, Timestamp, UserId};

/// Server-resolved identity of an authenticated user.
///
/// Built from the session at the gateway boundary. Client-supplied identity
/// fields on inbound events are never trusted; this is the only identity
/// attached to outbound events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
    pub image: Option<String>,
}

impl UserRef {
    pub fn new(id: UserId, name: impl Into<String>, image: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image,
        }
    }
}

/// A chat message as persisted by the message store.
///
/// The real-time layer never creates these on its own authority; records
/// enter the store through the persist endpoint (or an external writer) and
/// are only read back by the polling stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub id: String,
    pub channel_id: ChannelId,
    pub author: UserRef,
    pub body: String,
    pub created_at: Timestamp,
}
