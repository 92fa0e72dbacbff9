//! Request handlers for the WebSocket and HTTP surfaces.

pub mod http;
pub mod websocket;
