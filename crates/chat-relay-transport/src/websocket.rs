//! WebSocket endpoint for chat clients.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State, WebSocketUpgrade,
        ws::WebSocket,
    },
    response::IntoResponse,
};
use chat_relay_core::ChannelTransport;
use chat_relay_session::{ConnectionLifecycle, Registry};
use futures::{SinkExt, StreamExt};

use crate::protocol::{frame_from_message, message_from_outbound};

/// State shared by the chat endpoint handlers.
#[derive(Clone)]
pub struct RelayState {
    lifecycle: ConnectionLifecycle,
}

impl RelayState {
    /// Create handler state around a lifecycle manager.
    #[must_use]
    pub const fn new(lifecycle: ConnectionLifecycle) -> Self {
        Self { lifecycle }
    }

    /// Registry shared by every connection.
    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        self.lifecycle.registry()
    }
}

/// Upgrade handler for `/chat/{user_id}`.
pub async fn chat_handler(
    ws: WebSocketUpgrade,
    Path(user_id): Path<String>,
    State(state): State<RelayState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, Some(user_id), state))
}

/// Upgrade handler for `/chat` without an identifier.
///
/// The connection is accepted so the client gets a policy-violation close frame.
pub async fn missing_user_handler(
    ws: WebSocketUpgrade,
    State(state): State<RelayState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, None, state))
}

async fn handle_socket(socket: WebSocket, user_id: Option<String>, state: RelayState) {
    let (mut sender, receiver) = socket.split();

    // Every send to this connection goes through the queue
    let (transport, mut rx) = ChannelTransport::new();

    // Spawn task to forward queued items to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(outbound) = rx.recv().await {
            let is_close = outbound.is_close();
            if let Err(e) = sender.send(message_from_outbound(outbound)).await {
                tracing::debug!("WebSocket write failed: {e}");
                break;
            }
            if is_close {
                break;
            }
        }
    });

    let inbound = receiver.map(frame_from_message);
    let disconnect = state
        .lifecycle
        .run(user_id.as_deref(), Arc::new(transport), inbound)
        .await;
    tracing::debug!(?disconnect, "WebSocket handler finished");

    // The writer stops once the queue is flushed and the last transport handle is gone.
    if let Err(e) = send_task.await {
        tracing::error!("WebSocket writer task failed: {e}");
    }
}

/// Create the chat router.
///
/// # Example
/// ```ignore
/// let app = Router::new()
///     .merge(create_chat_router(RelayState::new(lifecycle)));
/// ```
#[must_use]
pub fn create_chat_router(state: RelayState) -> axum::Router {
    axum::Router::new()
        .route("/chat/{user_id}", axum::routing::get(chat_handler))
        .route("/chat", axum::routing::get(missing_user_handler))
        .route("/chat/", axum::routing::get(missing_user_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn test_create_chat_router() {
        let registry = Arc::new(Registry::new());
        let lifecycle = ConnectionLifecycle::new(Arc::clone(&registry), CancellationToken::new());
        let state = RelayState::new(lifecycle);
        assert!(Arc::ptr_eq(state.registry(), &registry));

        // If this doesn't panic, the routes don't conflict
        let _router = create_chat_router(state);
    }
}
