//! Error types for the session layer.

use checkerwire_transport::TransportError;

/// Errors that can occur while driving a client session.
///
/// Protocol errors never show up here: a frame that fails to decode is
/// logged and skipped, it does not end the session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The transport failed while the session was sending or receiving.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The session task behind a [`SessionHandle`](crate::SessionHandle)
    /// has stopped, so the action could not be delivered.
    #[error("session is no longer running")]
    HandleClosed,
}
