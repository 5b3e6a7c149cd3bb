//! # checkerwire
//!
//! Client-side protocol engine for a networked checkers game.
//!
//! checkerwire speaks the server's line-delimited, `#`-separated text
//! protocol over a WebSocket. Applications implement a single
//! [`GameModel`](checkerwire_session::GameModel) trait to receive state
//! changes, and drive the game through a session handle; the crate handles
//! framing, decoding, dispatch, player-list polling, and the connection
//! lifecycle.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use checkerwire::prelude::*;
//!
//! // Implement GameModel for your view model, then:
//! // checkerwire::init_tracing();
//! // let session = ClientBuilder::new()
//! //     .url("ws://127.0.0.1:8080/")
//! //     .connect(my_model)
//! //     .await?;
//! // let handle = session.handle();
//! // tokio::spawn(session.run());
//! // handle.login("alice", "secret").await?;
//! ```

mod client;
mod error;

pub use client::{Client, ClientBuilder, ClientConfig, DEFAULT_URL};
pub use error::CheckerwireError;

pub use checkerwire_poll as poll;
pub use checkerwire_protocol as protocol;
pub use checkerwire_session as session;
pub use checkerwire_transport as transport;

use tracing_subscriber::EnvFilter;

/// Installs a `tracing` fmt subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Does nothing
/// if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub mod prelude {
    pub use crate::{CheckerwireError, Client, ClientBuilder, ClientConfig};

    pub use checkerwire_protocol::{
        Board, Cell, ClientMessage, Color, Occupation, PlayerEntry, ServerMessage, Square,
    };
    pub use checkerwire_session::{
        Action, ClientSession, ConnectionStatus, Credentials, GameModel, LogLevel,
        SessionConfig, SessionHandle,
    };
    pub use checkerwire_transport::{Connection, ReadyState, WebSocketConnection};
}
