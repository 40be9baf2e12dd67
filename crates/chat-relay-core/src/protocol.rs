//! Wire protocol: inbound envelopes and outbound notices.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message from one client addressed to another.
///
/// `sender` and `receiver` are taken verbatim from the client; they are not
/// checked against the connection's registered identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// Claimed author, as written by the client.
    pub sender: String,
    /// Identifier of the destination session.
    pub receiver: String,
    /// Message body.
    pub content: String,
}

impl Envelope {
    /// Create an envelope.
    #[must_use]
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            content: content.into(),
        }
    }

    /// Decode an envelope from a text frame.
    ///
    /// Returns `None` for anything that is not a complete envelope object.
    #[must_use]
    pub fn decode(text: &str) -> Option<Self> {
        // Derived structs also accept the positional array form; only objects count.
        let fields = match serde_json::from_str::<Map<String, Value>>(text) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::trace!(error = %e, "Discarding malformed envelope");
                return None;
            }
        };
        match serde_json::from_value(Value::Object(fields)) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                tracing::trace!(error = %e, "Discarding malformed envelope");
                None
            }
        }
    }

    /// Encode as JSON text.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Plain-text notification sent from the server to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice<'a> {
    /// Sent once after registration.
    Welcome { user_id: &'a str },
    /// Forwarded message, delivered to the receiver.
    Message { sender: &'a str, content: &'a str },
    /// Delivered back to the sender when the receiver is absent.
    NotConnected { receiver: &'a str },
}

impl<'a> Notice<'a> {
    /// Forward notice for an envelope.
    #[must_use]
    pub fn forward(envelope: &'a Envelope) -> Self {
        Self::Message {
            sender: &envelope.sender,
            content: &envelope.content,
        }
    }
}

impl fmt::Display for Notice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Welcome { user_id } => write!(f, "Welcome to the chat, {user_id}!"),
            Self::Message { sender, content } => write!(f, "Message from {sender}: {content}"),
            Self::NotConnected { receiver } => write!(f, "User {receiver} is not connected."),
        }
    }
}
