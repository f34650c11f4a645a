//! Data Transfer Objects (DTOs) for the real-time distribution layer.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (client→server and server→client)
//! - `stream`: polling fallback stream frames
//! - `http`: HTTP API request/response DTOs

pub mod conversion;
pub mod http;
pub mod stream;
pub mod websocket;
