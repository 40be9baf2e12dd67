//! Per-connection lifecycle: `Connecting -> Active -> Closed`.

use std::sync::Arc;

use chat_relay_core::{
    CloseReason, Frame, Identifier, IdentifierError, Notice, Session, SessionTransport,
    TransportError,
};
use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::{Registry, RouteError, Router};

/// Why a connection reached `Closed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disconnect {
    /// No usable identifier; never registered.
    Rejected(IdentifierError),
    /// Peer closed or the inbound stream ended.
    PeerClosed,
    /// Process is shutting down.
    Shutdown,
    /// Fatal transport or routing error.
    Failed(String),
}

impl From<TransportError> for Disconnect {
    fn from(e: TransportError) -> Self {
        Self::Failed(e.to_string())
    }
}

impl From<RouteError> for Disconnect {
    fn from(e: RouteError) -> Self {
        Self::Failed(e.to_string())
    }
}

/// Drives one connection from accept to cleanup.
///
/// Cheap to clone; every clone shares the registry and the shutdown token.
#[derive(Debug, Clone)]
pub struct ConnectionLifecycle {
    registry: Arc<Registry>,
    router: Router,
    shutdown: CancellationToken,
}

impl ConnectionLifecycle {
    /// Create a lifecycle manager over the shared registry.
    #[must_use]
    pub fn new(registry: Arc<Registry>, shutdown: CancellationToken) -> Self {
        Self {
            router: Router::new(Arc::clone(&registry)),
            registry,
            shutdown,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Run a connection until it closes.
    ///
    /// `user_id` is the identifier extracted from the connection request.
    /// Inbound frames are processed strictly in order. The session is
    /// deregistered on every exit path, including this future being dropped.
    pub async fn run<S>(
        &self,
        user_id: Option<&str>,
        transport: Arc<dyn SessionTransport>,
        mut inbound: S,
    ) -> Disconnect
    where
        S: Stream<Item = Result<Frame, TransportError>> + Unpin + Send,
    {
        let identifier = match Identifier::parse(user_id) {
            Ok(identifier) => identifier,
            Err(e) => {
                tracing::info!(reason = %e, "Rejecting connection");
                transport
                    .close(CloseReason::policy_violation(e.to_string()))
                    .await;
                return Disconnect::Rejected(e);
            }
        };

        let session = Session::new(identifier, transport);
        let span = tracing::info_span!(
            "connection",
            user_id = %session.identifier(),
            connection_id = %session.connection_id(),
        );
        self.activate(session, &mut inbound).instrument(span).await
    }

    async fn activate<S>(&self, session: Session, inbound: &mut S) -> Disconnect
    where
        S: Stream<Item = Result<Frame, TransportError>> + Unpin + Send,
    {
        let registration = self.registry.acquire(session.clone());
        tracing::info!("User connected");

        let disconnect = self.serve(&session, inbound).await;

        if disconnect == Disconnect::Shutdown {
            session
                .close(CloseReason::going_away("Server shutting down"))
                .await;
        }
        registration.release();

        match &disconnect {
            Disconnect::Failed(reason) => tracing::warn!(%reason, "User disconnected"),
            other => tracing::info!(reason = ?other, "User disconnected"),
        }
        disconnect
    }

    async fn serve<S>(&self, session: &Session, inbound: &mut S) -> Disconnect
    where
        S: Stream<Item = Result<Frame, TransportError>> + Unpin + Send,
    {
        let welcome = Notice::Welcome {
            user_id: session.identifier().as_str(),
        };
        if let Err(e) = session.notify(welcome).await {
            return e.into();
        }

        loop {
            let next = tokio::select! {
                biased;
                () = self.shutdown.cancelled() => return Disconnect::Shutdown,
                next = inbound.next() => next,
            };

            match next {
                Some(Ok(Frame::Text(text))) => {
                    if let Err(e) = self.router.dispatch(session, &text).await {
                        return e.into();
                    }
                }
                Some(Ok(Frame::Binary(_) | Frame::Control)) => {}
                Some(Ok(Frame::Close)) | None => return Disconnect::PeerClosed,
                Some(Err(e)) => return e.into(),
            }
        }
    }
}
