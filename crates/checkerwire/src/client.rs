//! `ClientBuilder` and client configuration.
//!
//! This is the entry point for connecting to a checkers server. It ties
//! the layers together: transport → protocol → session.

use std::time::Duration;

use checkerwire_poll::PollConfig;
use checkerwire_session::{ClientSession, GameModel, SessionConfig};
use checkerwire_transport::WebSocketConnection;

use crate::CheckerwireError;

/// A session over the WebSocket transport.
pub type Client<M> = ClientSession<WebSocketConnection, M>;

/// Local development server.
pub const DEFAULT_URL: &str = "ws://127.0.0.1:8080/";

/// Settings for a client connection.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket URL of the game server.
    pub url: String,
    /// Period of the player-list poll. Default: 10 seconds.
    pub poll_interval: Duration,
    /// Upper bound on a random delay added to the first poll only.
    /// Default: none.
    pub poll_jitter: Duration,
    /// Capacity of the action channel. Default: 32.
    pub action_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let session = SessionConfig::default();
        Self {
            url: DEFAULT_URL.to_string(),
            poll_interval: session.poll.interval,
            poll_jitter: session.poll.initial_jitter,
            action_buffer: session.action_buffer,
        }
    }
}

impl ClientConfig {
    /// The session settings this config implies.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            poll: PollConfig {
                interval: self.poll_interval,
                initial_jitter: self.poll_jitter,
            },
            action_buffer: self.action_buffer,
        }
    }
}

/// Builder for configuring and connecting a client.
///
/// # Example
///
/// ```rust,ignore
/// use checkerwire::prelude::*;
///
/// let session = ClientBuilder::new()
///     .url("ws://127.0.0.1:8080/")
///     .connect(my_model)
///     .await?;
/// let handle = session.handle();
/// tokio::spawn(session.run());
/// handle.login("alice", "secret").await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing config.
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Sets the server URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Sets the player-list poll period.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Delays the first poll by a random amount below `jitter`, so many
    /// clients started together do not poll in lockstep.
    pub fn poll_jitter(mut self, jitter: Duration) -> Self {
        self.config.poll_jitter = jitter;
        self
    }

    /// Sets the action channel capacity.
    pub fn action_buffer(mut self, capacity: usize) -> Self {
        self.config.action_buffer = capacity;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Opens the WebSocket and wraps it in a session driving `model`.
    ///
    /// The model is told the connection is open before this returns.
    pub async fn connect<M: GameModel>(self, model: M) -> Result<Client<M>, CheckerwireError> {
        tracing::info!(url = %self.config.url, "connecting");
        let conn = WebSocketConnection::connect(&self.config.url).await?;
        Ok(ClientSession::new(conn, model, self.config.session_config()))
    }
}
