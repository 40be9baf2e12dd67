//! WebSocket chat relay server.
//!
//! Wires the registry, router and connection lifecycle to an axum app with
//! the `/chat/{user_id}` endpoint and a `/health` probe.

pub mod config;
pub mod server;
pub mod telemetry;

pub use config::{Args, ServerConfig};
pub use server::{ServerHandle, build_router, start};
