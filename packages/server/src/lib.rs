//! Real-time event distribution layer for the hiroba collaboration app.
//!
//! This crate implements the dual-path delivery core: a WebSocket gateway
//! with room-scoped fan-out, and a polling-based SSE fallback stream over
//! the persistent message store.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
