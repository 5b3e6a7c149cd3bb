//! Wire protocol for checkerwire.
//!
//! This crate defines the text protocol the checkers server speaks:
//!
//! - **Framing** ([`split_frames`]): one command per line, several lines
//!   may arrive in one transport payload.
//! - **Codec** ([`decode_command`], [`encode_command`], [`decode_board`]):
//!   `#`-separated fields and the 64-character board encoding.
//! - **Messages** ([`ServerMessage`], [`ClientMessage`]): the typed view of
//!   every command in each direction.
//! - **Errors** ([`ProtocolError`]): what can go wrong while decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw text) and session (state
//! updates). It holds no state and performs no I/O.
//!
//! ```text
//! Transport (payload) → Protocol (ServerMessage) → Session (model setters)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod board;
mod codec;
mod error;
mod frame;
mod message;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use board::{Board, Cell, Occupation, BOARD_CELLS, BOARD_SIZE, EMPTY_SYMBOL};
pub use codec::{
    decode_board, decode_command, encode_command, Command, FIELD_SEPARATOR,
    LINE_TERMINATOR,
};
pub use error::ProtocolError;
pub use frame::split_frames;
pub use message::{code, ClientMessage, ServerMessage};
pub use types::{Color, PlayerEntry, Square};
