use std::{net::SocketAddr, sync::Arc};

use axum::{Json, Router, extract::State, routing::get};
use chat_relay_session::{ConnectionLifecycle, Registry};
use chat_relay_transport::{RelayState, create_chat_router};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::ServerConfig;

/// Health probe response.
#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    connected: usize,
}

/// Build the axum router with all routes.
pub fn build_router(state: RelayState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state.clone())
        .merge(create_chat_router(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health_handler(State(state): State<RelayState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        connected: state.registry().len(),
    })
}

/// Bind the listener and start serving. Returns a handle to shut it down.
///
/// # Errors
/// Returns error if the listen address cannot be bound.
pub async fn start(config: ServerConfig) -> Result<ServerHandle, std::io::Error> {
    let registry = Arc::new(Registry::new());
    let shutdown = CancellationToken::new();
    let lifecycle = ConnectionLifecycle::new(Arc::clone(&registry), shutdown.clone());
    let app = build_router(RelayState::new(lifecycle));

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(%local_addr, "Chat relay listening");

    let signal = shutdown.clone();
    let server = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move { signal.cancelled().await })
            .await;
        if let Err(e) = result {
            tracing::error!("Server error: {e}");
        }
    });

    Ok(ServerHandle {
        local_addr,
        registry,
        shutdown,
        server,
    })
}

/// Handle returned by `start()`.
pub struct ServerHandle {
    local_addr: SocketAddr,
    registry: Arc<Registry>,
    shutdown: CancellationToken,
    server: JoinHandle<()>,
}

impl ServerHandle {
    /// Address the server is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Registry shared by every connection.
    #[must_use]
    pub const fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Stop accepting connections and close every active one.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Wait for the server task to finish.
    pub async fn stopped(self) {
        if let Err(e) = self.server.await {
            tracing::error!("Server task failed: {e}");
        }
    }
}
