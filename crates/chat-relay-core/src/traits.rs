//! Transport abstraction consumed by the relay.

use async_trait::async_trait;
use thiserror::Error;

/// Close status sent to a peer when the server ends a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseCode {
    /// Normal closure (1000).
    Normal,
    /// Server is going away (1001).
    GoingAway,
    /// Connection violated server policy (1008).
    PolicyViolation,
}

impl CloseCode {
    /// Numeric WebSocket close code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::Normal => 1000,
            Self::GoingAway => 1001,
            Self::PolicyViolation => 1008,
        }
    }
}

/// Close code plus explanatory text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseReason {
    /// Close status code.
    pub code: CloseCode,
    /// Human-readable reason sent with the close frame.
    pub message: String,
}

impl CloseReason {
    /// Create a close reason.
    #[must_use]
    pub fn new(code: CloseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Policy violation close, used to reject a connection.
    #[must_use]
    pub fn policy_violation(message: impl Into<String>) -> Self {
        Self::new(CloseCode::PolicyViolation, message)
    }

    /// Going-away close, used on server shutdown.
    #[must_use]
    pub fn going_away(message: impl Into<String>) -> Self {
        Self::new(CloseCode::GoingAway, message)
    }
}

/// One inbound frame from a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Text frame; the only kind that carries envelopes.
    Text(String),
    /// Binary frame (ignored by the relay).
    Binary(Vec<u8>),
    /// Ping/pong and other control traffic.
    Control,
    /// Peer requested close.
    Close,
}

/// Transport error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Transport closed")]
    Closed,
    #[error("Send failed: {0}")]
    Send(String),
    #[error("Receive failed: {0}")]
    Receive(String),
}

/// Outbound half of an established connection.
///
/// Implementations must not block indefinitely in `send`; the router calls it
/// inline while processing the sender's frame.
#[async_trait]
pub trait SessionTransport: Send + Sync {
    /// Send a text frame to the peer.
    async fn send(&self, text: String) -> Result<(), TransportError>;

    /// Close the connection with the given reason.
    async fn close(&self, reason: CloseReason);
}
