//! Mapping between WebSocket messages and relay frames.

use axum::extract::ws::{CloseFrame, Message};
use chat_relay_core::{Frame, Outbound, TransportError};

/// Convert an inbound WebSocket message into a relay frame.
///
/// # Errors
/// Returns error if the socket reported a receive failure.
pub fn frame_from_message(msg: Result<Message, axum::Error>) -> Result<Frame, TransportError> {
    match msg {
        Ok(Message::Text(text)) => Ok(Frame::Text(text.as_str().to_owned())),
        Ok(Message::Binary(data)) => Ok(Frame::Binary(data.to_vec())),
        Ok(Message::Ping(_) | Message::Pong(_)) => Ok(Frame::Control),
        Ok(Message::Close(_)) => Ok(Frame::Close),
        Err(e) => Err(TransportError::Receive(e.to_string())),
    }
}

/// Convert a queued outbound item into a WebSocket message.
#[must_use]
pub fn message_from_outbound(outbound: Outbound) -> Message {
    match outbound {
        Outbound::Text(text) => Message::Text(text.into()),
        Outbound::Close(reason) => Message::Close(Some(CloseFrame {
            code: reason.code.as_u16(),
            reason: reason.message.into(),
        })),
    }
}
