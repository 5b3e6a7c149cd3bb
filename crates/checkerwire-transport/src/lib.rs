//! Client transport abstraction for checkerwire.
//!
//! Provides the [`Connection`] trait the session drives: send a line of
//! text, receive the next payload, report whether the link is open, close.
//! The session never touches sockets directly, so tests can substitute an
//! in-memory connection.
//!
//! # Feature Flags
//!
//! - `websocket` (default): WebSocket client via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::WebSocketConnection;

use std::fmt;

/// Opaque identifier for a connection, used in log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Readiness of a connection, mirroring the WebSocket `readyState` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ReadyState {
    #[default]
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

impl ReadyState {
    /// Converts the raw value stored in an atomic. Unknown values read as
    /// `Closed`.
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Connecting,
            1 => Self::Open,
            2 => Self::Closing,
            _ => Self::Closed,
        }
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Open => write!(f, "open"),
            Self::Closing => write!(f, "closing"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// A single client connection that carries text payloads.
pub trait Connection: Send + Sync + 'static {
    /// The error type for connection operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends one text payload to the server.
    async fn send(&self, text: &str) -> Result<(), Self::Error>;

    /// Receives the next payload from the server.
    ///
    /// A payload may contain several protocol lines. Returns `Ok(None)`
    /// when the connection is cleanly closed.
    async fn recv(&self) -> Result<Option<String>, Self::Error>;

    /// Closes the connection.
    async fn close(&self) -> Result<(), Self::Error>;

    /// Current readiness.
    fn ready_state(&self) -> ReadyState;

    /// `true` only while the connection is [`ReadyState::Open`].
    fn is_open(&self) -> bool {
        self.ready_state() == ReadyState::Open
    }

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
