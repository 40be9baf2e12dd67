//! In-memory transport backed by an unbounded mpsc channel.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::traits::{CloseReason, SessionTransport, TransportError};

/// Item queued for a connection's writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Text frame.
    Text(String),
    /// Close frame; nothing after it is written.
    Close(CloseReason),
}

impl Outbound {
    #[must_use]
    pub const fn is_close(&self) -> bool {
        matches!(self, Self::Close(_))
    }
}

/// Transport that queues outbound items on a channel.
///
/// The receiving half is drained by whoever owns the real connection (the
/// WebSocket writer task) or inspected directly in tests. Sends fail once the
/// receiver has been dropped.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelTransport {
    /// Create a transport and the receiver for its outbound queue.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Whether the receiving side has gone away.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[async_trait]
impl SessionTransport for ChannelTransport {
    async fn send(&self, text: String) -> Result<(), TransportError> {
        self.tx
            .send(Outbound::Text(text))
            .map_err(|_| TransportError::Closed)
    }

    async fn close(&self, reason: CloseReason) {
        // Already-closed peers need no close frame.
        let _ = self.tx.send(Outbound::Close(reason));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CloseCode;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_send_queues_text() {
        let (transport, mut rx) = ChannelTransport::new();
        assert_ok!(transport.send("hello".to_string()).await);
        assert_eq!(rx.recv().await, Some(Outbound::Text("hello".to_string())));
    }

    #[tokio::test]
    async fn test_send_fails_after_receiver_dropped() {
        let (transport, rx) = ChannelTransport::new();
        drop(rx);
        assert!(transport.is_closed());
        let error = assert_err!(transport.send("lost".to_string()).await);
        assert_eq!(error, TransportError::Closed);
    }

    #[tokio::test]
    async fn test_close_queues_close_item() {
        let (transport, mut rx) = ChannelTransport::new();
        transport
            .close(CloseReason::policy_violation("No userId provided"))
            .await;
        let item = rx.recv().await.unwrap();
        assert!(item.is_close());
        if let Outbound::Close(reason) = item {
            assert_eq!(reason.code, CloseCode::PolicyViolation);
        }
    }
}
