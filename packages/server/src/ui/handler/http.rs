//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

use crate::{
    domain::ChannelId,
    infrastructure::dto::http::{MessageDto, PostMessageRequest, RoomSnapshotDto},
    ui::state::AppState,
    usecase::{AccessError, PersistMessageError},
};

use super::bearer_token;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint to get the current room registry state (for testing purposes)
pub async fn debug_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSnapshotDto>> {
    let snapshot = state.registry.snapshot().await;

    // Domain Model から DTO への変換
    let mut rooms: Vec<RoomSnapshotDto> = snapshot
        .into_iter()
        .map(|(room, members)| RoomSnapshotDto {
            room: room.to_string(),
            members: members.iter().map(|c| c.to_string()).collect(),
        })
        .collect();
    // Sort by room key for consistent ordering
    rooms.sort_by(|a, b| a.room.cmp(&b.room));

    Json(rooms)
}

/// Persist a message in a channel (POST /api/channels/{channel_id}/messages)
///
/// The store is written before any broadcast happens; the returned record is
/// the authoritative copy clients pass along in `send-message`.
pub async fn post_channel_message(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<MessageDto>), StatusCode> {
    let channel_id =
        ChannelId::try_from(channel_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let Some(token) = bearer_token(&headers) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    match state
        .persist_message_usecase
        .execute(&token, &channel_id, request.body)
        .await
    {
        Ok(record) => Ok((StatusCode::CREATED, Json(record.into()))),
        Err(PersistMessageError::Access(AccessError::Unauthenticated)) => {
            Err(StatusCode::UNAUTHORIZED)
        }
        Err(PersistMessageError::Access(AccessError::Forbidden)) => Err(StatusCode::FORBIDDEN),
        Err(PersistMessageError::Store(e)) => {
            tracing::error!("Failed to persist message: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
