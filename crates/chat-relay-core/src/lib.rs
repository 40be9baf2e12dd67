//! Core types for the point-to-point chat relay.
//!
//! This crate provides the fundamental building blocks:
//! - `Identifier` - Client-chosen endpoint name
//! - `Session` - Live binding of an identifier to an outbound transport
//! - `Envelope` / `Notice` - Inbound wire message and outbound notification texts
//! - `SessionTransport` trait and the inbound `Frame` model
//! - `ChannelTransport` - In-memory transport backed by an mpsc channel

#[cfg(feature = "channel")]
pub mod channel;
pub mod identifier;
pub mod protocol;
pub mod session;
pub mod traits;

#[cfg(feature = "channel")]
pub use channel::{ChannelTransport, Outbound};
pub use identifier::{Identifier, IdentifierError};
pub use protocol::{Envelope, Notice};
pub use session::Session;
pub use traits::{CloseCode, CloseReason, Frame, SessionTransport, TransportError};
