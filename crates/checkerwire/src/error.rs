//! Unified error type for checkerwire.

use checkerwire_protocol::ProtocolError;
use checkerwire_session::SessionError;
use checkerwire_transport::TransportError;

/// Any error a checkerwire layer can produce.
///
/// Applications that go through the meta-crate only need this one type;
/// `?` converts each layer's error into it.
#[derive(Debug, thiserror::Error)]
pub enum CheckerwireError {
    /// A transport-level error (connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (unknown command, bad argument, bad board).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (transport failure mid-session, stopped
    /// session behind a handle).
    #[error(transparent)]
    Session(#[from] SessionError),
}
