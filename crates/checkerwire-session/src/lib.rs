//! Client session for checkerwire.
//!
//! This crate turns a raw transport connection into a game client:
//!
//! 1. **Dispatch**: each decoded server message becomes setter calls on
//!    the application's [`GameModel`] ([`dispatch`], [`dispatch_frame`]).
//! 2. **Sticky frames**: a payload carrying several frames dispatches the
//!    first one at once and defers the rest ([`FrameQueue`]).
//! 3. **Outbound actions**: login, invitations, moves and so on, each
//!    guarded by a readiness check on the connection ([`ClientSession`]).
//! 4. **Lifecycle**: the event loop, player-list polling, and connection
//!    status reporting ([`ClientSession::run`], [`SessionHandle`]).
//!
//! # How it fits in the stack
//!
//! ```text
//! Application (above)  ← implements GameModel, drives a SessionHandle
//!     ↕
//! Session Layer (this crate)  ← dispatch, outbound API, event loop
//!     ↕
//! Protocol Layer (below)  ← frames, commands, typed messages
//!     ↕
//! Transport Layer (below)  ← the WebSocket connection
//! ```

#![allow(async_fn_in_trait)]

mod dispatch;
mod error;
mod handle;
mod model;
mod queue;
mod session;

pub use dispatch::{dispatch, dispatch_frame};
pub use error::SessionError;
pub use handle::{Action, SessionHandle};
pub use model::{ConnectionStatus, Credentials, GameModel, LogLevel};
pub use queue::FrameQueue;
pub use session::{ClientSession, SessionConfig};
