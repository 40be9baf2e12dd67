//! Connected endpoint sessions.

use std::{fmt, sync::Arc};

use uuid::Uuid;

use crate::{
    Identifier, Notice,
    traits::{CloseReason, SessionTransport, TransportError},
};

/// Connection identifier, unique per accepted connection.
pub type ConnectionId = Uuid;

/// Live binding between an identifier and one connection's outbound transport.
///
/// Cloning is cheap and shares the transport. The registry hands out clones so
/// callers can send without holding the registry lock.
#[derive(Clone)]
pub struct Session {
    identifier: Identifier,
    connection_id: ConnectionId,
    transport: Arc<dyn SessionTransport>,
}

impl Session {
    /// Create a session for a freshly accepted connection.
    #[must_use]
    pub fn new(identifier: Identifier, transport: Arc<dyn SessionTransport>) -> Self {
        Self {
            identifier,
            connection_id: Uuid::new_v4(),
            transport,
        }
    }

    /// Identifier this session is registered under.
    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Connection this session belongs to.
    #[must_use]
    pub const fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Whether both handles refer to the same connection.
    #[must_use]
    pub fn same_connection(&self, other: &Self) -> bool {
        self.connection_id == other.connection_id
    }

    /// Send a notice to this session's peer.
    ///
    /// # Errors
    /// Returns error if the transport is closed or the write fails.
    pub async fn notify(&self, notice: Notice<'_>) -> Result<(), TransportError> {
        self.transport.send(notice.to_string()).await
    }

    /// Close this session's connection.
    pub async fn close(&self, reason: CloseReason) {
        self.transport.close(reason).await;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identifier", &self.identifier)
            .field("connection_id", &self.connection_id)
            .finish_non_exhaustive()
    }
}
