//! WebSocket layer: connection handling, command parsing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` pushes change events to clients that
//! subscribe to the `wines`, `events` or `chat` topics (or `"*"`).

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
