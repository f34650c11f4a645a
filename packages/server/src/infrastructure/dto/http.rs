//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::UserDto;

/// Request body for persisting a channel message.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageRequest {
    pub body: String,
}

/// A persisted message as returned over HTTP and in stream frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: String,
    pub channel_id: String,
    pub user: UserDto,
    pub body: String,
    /// UTC Unix timestamp in milliseconds
    pub created_at: i64,
}

/// One room and its current member connections (debug endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSnapshotDto {
    pub room: String,
    pub members: Vec<String>,
}
