//! Transport layer for the chat relay.
//!
//! Provides:
//! - Frame mapping between WebSocket messages and relay frames
//! - WebSocket endpoint (feature: websocket)

#[cfg(feature = "websocket")]
pub mod protocol;

#[cfg(feature = "websocket")]
pub mod websocket;

#[cfg(feature = "websocket")]
pub use websocket::{RelayState, create_chat_router};
