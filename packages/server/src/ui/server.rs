//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        http::{debug_rooms, health_check, post_channel_message},
        stream::channel_stream_handler,
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Real-time gateway server
///
/// This struct encapsulates the server configuration and provides methods to
/// run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run the real-time gateway server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // ポーリングフォールバックストリーム
            .route("/api/channels/stream", get(channel_stream_handler))
            // HTTP エンドポイント
            .route(
                "/api/channels/{channel_id}/messages",
                post(post_channel_message),
            )
            .route("/api/health", get(health_check))
            .route("/debug/rooms", get(debug_rooms))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone());

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Real-time gateway server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // Registry lifecycle contract: clear membership state on shutdown
        self.state.registry.clear().await;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
