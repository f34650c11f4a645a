//! Polling fallback stream handler.
//!
//! For clients that cannot hold a persistent connection, this endpoint
//! emulates push delivery over Server-Sent Events: one `connected` frame at
//! open, then a timer-driven poll against the message store per tick, with
//! a `messages` frame only when the look-back window found new rows.
//!
//! The poll timer is owned by the stream itself: when the client closes the
//! transport, axum drops the stream and the interval with it, so no timer
//! can outlive its stream on any exit path.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream, StreamExt};
use serde::Deserialize;

use crate::{
    domain::ChannelId,
    infrastructure::dto::{http::MessageDto, stream::StreamFrame},
    ui::state::AppState,
    usecase::{AccessError, POLL_INTERVAL},
};

use super::bearer_token;

/// Query parameters for the channel stream
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub channel_id: Option<String>,
}

/// GET /api/channels/stream?channel_id=<id>
///
/// Access control runs once at stream-open time; every refusal happens
/// before the first frame is emitted.
pub async fn channel_stream_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<StreamQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, StatusCode> {
    // channel_id は必須
    let Some(raw_channel_id) = query.channel_id else {
        tracing::warn!("Stream request rejected: missing channel_id");
        return Err(StatusCode::BAD_REQUEST);
    };
    let channel_id = match ChannelId::try_from(raw_channel_id) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Stream request rejected: invalid channel_id");
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let Some(token) = bearer_token(&headers) else {
        tracing::warn!("Stream request rejected: missing session token");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let user = state
        .channel_stream_usecase
        .authorize(&token, &channel_id)
        .await
        .map_err(|e| {
            tracing::warn!("Stream request rejected: {}", e);
            match e {
                AccessError::Unauthenticated => StatusCode::UNAUTHORIZED,
                AccessError::Forbidden => StatusCode::FORBIDDEN,
            }
        })?;

    tracing::info!(
        "Stream opened for channel '{}' by user '{}'",
        channel_id.as_str(),
        user.id.as_str()
    );

    // 開始直後に connected フレームを 1 回送る
    let connected_json = serde_json::to_string(&StreamFrame::Connected).unwrap();
    let connected =
        stream::once(async move { Ok::<_, axum::Error>(Event::default().data(connected_json)) });

    // 以降は固定周期の tick ごとにストアを問い合わせる。最初の tick は
    // 開始から 1 周期後。
    let usecase = state.channel_stream_usecase.clone();
    let interval = tokio::time::interval_at(
        tokio::time::Instant::now() + POLL_INTERVAL,
        POLL_INTERVAL,
    );
    let ticks = stream::unfold(
        (interval, usecase, channel_id),
        |(mut interval, usecase, channel_id)| async move {
            loop {
                interval.tick().await;
                // 窓内ゼロ件（またはクエリ失敗）の tick はフレームを出さず
                // 次の tick を待つ
                if let Some(batch) = usecase.poll_once(&channel_id).await {
                    let data: Vec<MessageDto> =
                        batch.into_iter().map(MessageDto::from).collect();
                    let frame = StreamFrame::Messages { data };
                    let json = serde_json::to_string(&frame).unwrap();
                    return Some((
                        Ok::<_, axum::Error>(Event::default().data(json)),
                        (interval, usecase, channel_id),
                    ));
                }
            }
        },
    );

    Ok(Sse::new(connected.chain(ticks)).keep_alive(KeepAlive::default()))
}
