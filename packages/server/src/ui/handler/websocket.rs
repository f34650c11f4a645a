//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ChannelId, ConnectionId, PresenceStatus, UserRef, WorkspaceSlug},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Resolve the session before upgrading; an unresolvable identity never
    // reaches the router.
    let user = match state.session_store.authenticate(&query.token).await {
        Ok(user) => user,
        Err(_) => {
            tracing::warn!("WebSocket connection rejected: invalid session token");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    let connection_id = ConnectionId::generate();
    tracing::info!(
        "Connection '{}' authenticated as user '{}'",
        connection_id,
        user.id.as_str()
    );

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, user)))
}

/// Spawns a task that receives events from the rx channel and pushes them to
/// the WebSocket sender.
///
/// This function handles the outbound event flow: events fanned out by the
/// router (via the rx channel) are sent to this client's WebSocket
/// connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the event to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    user: UserRef,
) {
    let (sender, mut receiver) = socket.split();

    // Create this connection's outbound channel and register it
    let (tx, rx) = mpsc::unbounded_channel();
    state.connect_usecase.execute(connection_id.clone(), tx).await;

    // Spawn a task to push events from the router to this client
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();
    let user_clone = user.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    // Parse the incoming event
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Failed to parse client event: {}", e);
                            continue;
                        }
                    };

                    route_client_event(&state_clone, &connection_id_clone, &user_clone, event)
                        .await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Remove the connection from every room in one step and drop its sender.
    // Disconnection is silent: a crashed client cannot signal leave intent,
    // so no leave notifications are emitted here.
    let rooms_left = state.disconnect_usecase.execute(&connection_id).await;
    tracing::info!(
        "Connection '{}' disconnected (left {} rooms)",
        connection_id,
        rooms_left.len()
    );
}

/// Dispatch one inbound event to its fan-out rule.
///
/// Identity on outbound events always comes from the connection's
/// authenticated user; client-supplied `user` payload fields are ignored.
async fn route_client_event(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    user: &UserRef,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinWorkspace { workspace_slug } => {
            let Ok(workspace) = WorkspaceSlug::try_from(workspace_slug) else {
                tracing::warn!("Invalid workspace slug in join-workspace");
                return;
            };
            match state
                .join_workspace_usecase
                .execute(connection_id, &user.id, &workspace)
                .await
            {
                Ok(()) => {
                    tracing::info!(
                        "Connection '{}' joined room 'workspace-{}'",
                        connection_id,
                        workspace.as_str()
                    );
                }
                Err(e) => tracing::warn!("join-workspace rejected: {}", e),
            }
        }
        ClientEvent::JoinChannel { channel_id, .. } => {
            let Ok(channel_id) = ChannelId::try_from(channel_id) else {
                tracing::warn!("Invalid channel id in join-channel");
                return;
            };
            let joined = ServerEvent::UserJoinedChannel {
                user_id: user.id.as_str().to_string(),
                user_name: user.name.clone(),
                user_image: user.image.clone(),
            };
            let json = serde_json::to_string(&joined).unwrap();
            match state
                .join_channel_usecase
                .execute(connection_id, &user.id, &channel_id, &json)
                .await
            {
                Ok(notified) => {
                    tracing::info!(
                        "Connection '{}' joined room 'channel-{}' ({} members notified)",
                        connection_id,
                        channel_id.as_str(),
                        notified.len()
                    );
                }
                Err(e) => tracing::warn!("join-channel rejected: {}", e),
            }
        }
        ClientEvent::LeaveChannel { channel_id, .. } => {
            let Ok(channel_id) = ChannelId::try_from(channel_id) else {
                tracing::warn!("Invalid channel id in leave-channel");
                return;
            };
            let left = ServerEvent::UserLeftChannel {
                user_id: user.id.as_str().to_string(),
                user_name: user.name.clone(),
                user_image: user.image.clone(),
            };
            let json = serde_json::to_string(&left).unwrap();
            let remaining = state
                .leave_channel_usecase
                .execute(connection_id, &channel_id, &json)
                .await;
            tracing::info!(
                "Connection '{}' left room 'channel-{}' ({} members notified)",
                connection_id,
                channel_id.as_str(),
                remaining.len()
            );
        }
        ClientEvent::TypingStart { channel_id, .. } => {
            let Ok(channel_id) = ChannelId::try_from(channel_id) else {
                tracing::warn!("Invalid channel id in typing-start");
                return;
            };
            let typing = ServerEvent::UserTyping {
                user_id: user.id.as_str().to_string(),
                user_name: user.name.clone(),
                user_image: user.image.clone(),
            };
            let json = serde_json::to_string(&typing).unwrap();
            state
                .route_event_usecase
                .notify_typing(connection_id, &channel_id, &json)
                .await;
        }
        ClientEvent::TypingStop { channel_id, .. } => {
            let Ok(channel_id) = ChannelId::try_from(channel_id) else {
                tracing::warn!("Invalid channel id in typing-stop");
                return;
            };
            let stopped = ServerEvent::UserStoppedTyping {
                user_id: user.id.as_str().to_string(),
            };
            let json = serde_json::to_string(&stopped).unwrap();
            state
                .route_event_usecase
                .notify_typing(connection_id, &channel_id, &json)
                .await;
        }
        ClientEvent::SendMessage {
            channel_id, message, ..
        } => {
            let Ok(channel_id) = ChannelId::try_from(channel_id) else {
                tracing::warn!("Invalid channel id in send-message");
                return;
            };
            // The message was already persisted by the store; pass the
            // authoritative record through unmodified, sender included.
            let received = ServerEvent::MessageReceived { message };
            let json = serde_json::to_string(&received).unwrap();
            let targets = state
                .route_event_usecase
                .broadcast_message(&channel_id, &json)
                .await;
            tracing::debug!(
                "message-received fanned out to {} members of 'channel-{}'",
                targets.len(),
                channel_id.as_str()
            );
        }
        ClientEvent::MessageReaction {
            channel_id,
            message_id,
            reaction,
            ..
        } => {
            let Ok(channel_id) = ChannelId::try_from(channel_id) else {
                tracing::warn!("Invalid channel id in message-reaction");
                return;
            };
            let added = ServerEvent::ReactionAdded {
                message_id,
                reaction,
                user: user.clone().into(),
            };
            let json = serde_json::to_string(&added).unwrap();
            state
                .route_event_usecase
                .notify_reaction(connection_id, &channel_id, &json)
                .await;
        }
        ClientEvent::PresenceChange {
            workspace_slug,
            status,
            ..
        } => {
            let Ok(workspace) = WorkspaceSlug::try_from(workspace_slug) else {
                tracing::warn!("Invalid workspace slug in presence-change");
                return;
            };
            let change = ServerEvent::PresenceChange {
                user_id: user.id.as_str().to_string(),
                status: PresenceStatus::normalize(&status).as_str().to_string(),
            };
            let json = serde_json::to_string(&change).unwrap();
            state
                .route_event_usecase
                .notify_presence(connection_id, &workspace, &json)
                .await;
        }
    }
}
