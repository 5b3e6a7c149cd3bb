//! Error types for the protocol layer.
//!
//! Each crate in checkerwire defines its own error enum. A
//! `ProtocolError` always means the text on the wire could not be turned
//! into a typed message: the frame itself was bad, not the connection.

/// Errors that can occur while decoding frames.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The leading field of the frame is not a command this client knows.
    ///
    /// The session treats this as a soft failure: the frame is skipped and
    /// nothing reaches the state holder.
    #[error("unknown command code {0:?}")]
    UnknownCommand(String),

    /// A positional argument the command requires is not present.
    ///
    /// `index` is zero-based and counts arguments after the code.
    #[error("{code}: missing argument {index}")]
    MissingArgument { code: &'static str, index: usize },

    /// An argument is present but could not be interpreted.
    #[error("{code}: invalid argument {value:?} ({reason})")]
    InvalidArgument {
        code: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A board string did not contain exactly 64 cells.
    #[error("board must be 64 characters, got {0}")]
    BoardLength(usize),
}
