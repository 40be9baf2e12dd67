//! Connection registry, delivery router and per-connection lifecycle.
//!
//! Provides:
//! - `Registry` - Concurrency-safe identifier to session mapping
//! - `Router` - Decode inbound envelopes and forward them
//! - `ConnectionLifecycle` - Register, welcome, receive loop, cleanup

pub mod lifecycle;
pub mod registry;
pub mod router;

pub use lifecycle::{ConnectionLifecycle, Disconnect};
pub use registry::{Registration, Registry};
pub use router::{RouteError, RouteOutcome, Router};
