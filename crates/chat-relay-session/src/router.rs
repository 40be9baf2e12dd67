//! Delivery router.

use std::sync::Arc;

use chat_relay_core::{Envelope, Notice, Session, TransportError};

use crate::Registry;

/// Fatal routing error for the sender's connection.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Failed to notify sender: {0}")]
    NoticeFailed(#[source] TransportError),
}

/// What happened to one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Forwarded to the receiver's transport.
    Delivered,
    /// Receiver was registered but its send failed; the message is gone.
    DeliveryLost,
    /// Receiver not registered; the sender was told so.
    ReceiverAbsent,
    /// Frame did not decode as an envelope and was dropped.
    Discarded,
}

/// Routes envelopes to the session registered under their receiver.
///
/// Forwarding is synchronous and unbuffered: at most one send per envelope,
/// no retries.
#[derive(Debug, Clone)]
pub struct Router {
    registry: Arc<Registry>,
}

impl Router {
    /// Create a router over the shared registry.
    #[must_use]
    pub const fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Decode a text frame and route it.
    ///
    /// # Errors
    /// Returns error if the sender could not be told the receiver is absent.
    pub async fn dispatch(&self, sender: &Session, text: &str) -> Result<RouteOutcome, RouteError> {
        let Some(envelope) = Envelope::decode(text) else {
            return Ok(RouteOutcome::Discarded);
        };
        self.route(sender, &envelope).await
    }

    /// Route a decoded envelope.
    ///
    /// # Errors
    /// Returns error if the sender could not be told the receiver is absent.
    pub async fn route(
        &self,
        sender: &Session,
        envelope: &Envelope,
    ) -> Result<RouteOutcome, RouteError> {
        // Clone out of the registry so no lock is held while sending.
        let destination = self.registry.lookup(&envelope.receiver);

        if let Some(destination) = destination {
            return match destination.notify(Notice::forward(envelope)).await {
                Ok(()) => Ok(RouteOutcome::Delivered),
                Err(e) => {
                    tracing::debug!(
                        from = %sender.identifier(),
                        receiver = %envelope.receiver,
                        error = %e,
                        "Delivery lost"
                    );
                    Ok(RouteOutcome::DeliveryLost)
                }
            };
        }

        sender
            .notify(Notice::NotConnected {
                receiver: &envelope.receiver,
            })
            .await
            .map_err(RouteError::NoticeFailed)?;
        Ok(RouteOutcome::ReceiverAbsent)
    }
}
