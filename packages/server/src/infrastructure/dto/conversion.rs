//! Conversion logic between DTOs and domain entities.

use crate::domain::{MessageRecord, UserRef};

use super::http::MessageDto;
use super::websocket::UserDto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<UserRef> for UserDto {
    fn from(user: UserRef) -> Self {
        Self {
            id: user.id.into_string(),
            name: user.name,
            image: user.image,
        }
    }
}

impl From<MessageRecord> for MessageDto {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            channel_id: record.channel_id.into_string(),
            user: record.author.into(),
            body: record.body,
            created_at: record.created_at.value(),
        }
    }
}
