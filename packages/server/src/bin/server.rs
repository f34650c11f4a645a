//! Real-time event distribution server for the hiroba collaboration app.
//!
//! Fans out chat, typing, reaction and presence events to room members over
//! WebSocket, with a polling SSE stream as the fallback delivery path.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    domain::{ChannelId, UserId, UserRef, WorkspaceSlug},
    infrastructure::{
        directory::InMemoryChannelDirectory, pusher::WebSocketEventPusher,
        registry::InMemoryRoomRegistry, session::InMemorySessionStore,
        store::InMemoryMessageStore,
    },
    ui::{Server, state::AppState},
    usecase::{
        ChannelStreamUseCase, ConnectUseCase, DisconnectUseCase, JoinChannelUseCase,
        JoinWorkspaceUseCase, LeaveChannelUseCase, PersistMessageUseCase, RouteEventUseCase,
    },
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time event distribution server for hiroba", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Skip seeding the demo workspace, channels and sessions
    #[arg(long)]
    no_seed: bool,
}

/// Seed the in-memory session store and channel directory with a demo
/// workspace so the process is usable out of the box.
///
/// The in-memory ports stand in for the external identity provider and
/// channel records; a deployable build replaces them here at wiring time.
async fn seed_demo_data(sessions: &InMemorySessionStore, directory: &InMemoryChannelDirectory) {
    let workspace = WorkspaceSlug::try_from("acme".to_string()).expect("valid demo slug");

    for channel in ["general", "random"] {
        directory
            .register(
                ChannelId::try_from(channel.to_string()).expect("valid demo channel id"),
                workspace.clone(),
            )
            .await;
    }

    for (token, id, name) in [
        ("alice-token", "alice", "Alice"),
        ("bob-token", "bob", "Bob"),
    ] {
        let user_id = UserId::try_from(id.to_string()).expect("valid demo user id");
        sessions
            .insert_session(token, UserRef::new(user_id.clone(), name, None))
            .await;
        sessions.add_member(workspace.clone(), user_id).await;
    }

    // eve has a session but no workspace membership (useful for testing
    // the forbidden paths)
    let eve = UserId::try_from("eve".to_string()).expect("valid demo user id");
    sessions
        .insert_session("eve-token", UserRef::new(eve, "Eve", None))
        .await;

    tracing::info!("Seeded demo workspace 'acme' with channels 'general', 'random'");
    tracing::warn!("Demo sessions are enabled (alice-token, bob-token, eve-token)");
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry / Pusher / Store / Session / Directory
    // 2. UseCases
    // 3. AppState
    // 4. Server

    // 1. Create infrastructure (in-memory implementations)
    let registry = Arc::new(InMemoryRoomRegistry::new());
    let pusher = Arc::new(WebSocketEventPusher::new());
    let store = Arc::new(InMemoryMessageStore::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let directory = Arc::new(InMemoryChannelDirectory::new());
    let clock = Arc::new(SystemClock);

    if !args.no_seed {
        seed_demo_data(&sessions, &directory).await;
    }

    // 2. Create UseCases
    let connect_usecase = Arc::new(ConnectUseCase::new(pusher.clone()));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(registry.clone(), pusher.clone()));
    let join_workspace_usecase = Arc::new(JoinWorkspaceUseCase::new(
        registry.clone(),
        sessions.clone(),
    ));
    let join_channel_usecase = Arc::new(JoinChannelUseCase::new(
        registry.clone(),
        pusher.clone(),
        sessions.clone(),
        directory.clone(),
    ));
    let leave_channel_usecase = Arc::new(LeaveChannelUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let route_event_usecase = Arc::new(RouteEventUseCase::new(registry.clone(), pusher.clone()));
    let channel_stream_usecase = Arc::new(ChannelStreamUseCase::new(
        sessions.clone(),
        directory.clone(),
        store.clone(),
        clock.clone(),
    ));
    let persist_message_usecase = Arc::new(PersistMessageUseCase::new(
        sessions.clone(),
        directory.clone(),
        store.clone(),
        clock.clone(),
    ));

    // 3. Create AppState
    let state = AppState {
        session_store: sessions,
        registry,
        connect_usecase,
        disconnect_usecase,
        join_workspace_usecase,
        join_channel_usecase,
        leave_channel_usecase,
        route_event_usecase,
        channel_stream_usecase,
        persist_message_usecase,
    };

    // 4. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
