//! Shared utilities for the hiroba workspace-collaboration backend.
//!
//! Crates in this workspace share logging setup and time handling through
//! this package so that binaries and tests configure them the same way.

pub mod logger;
pub mod time;
