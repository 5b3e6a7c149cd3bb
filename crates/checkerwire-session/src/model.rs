//! The state-holder seam: what the session writes to.
//!
//! checkerwire does not store game state itself. Every decoded server
//! message becomes one or more setter calls on a [`GameModel`] supplied by
//! the application, which owns the values from then on. A GUI would
//! implement this trait on its view model; a test can simply record the
//! calls.

use std::fmt;

use checkerwire_protocol::{Board, Color, PlayerEntry};

/// Login details recorded locally when the user logs in or registers.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Keeps the password out of log output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Severity attached to an entry in the game log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Info,
    Error,
}

/// A change in the transport's state, reported once per change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Open,
    Error(String),
    Closed,
}

/// Receives every state change the session derives from the server.
///
/// Methods are called from the session's task, one at a time, in the order
/// the frames arrived.
pub trait GameModel: Send + 'static {
    /// Credentials of the user who is logging in or registering.
    fn set_user(&mut self, credentials: Credentials);

    /// Result of a login attempt.
    fn set_user_logged_in(&mut self, logged_in: bool);

    /// Result of an account registration.
    fn set_user_created(&mut self, created: bool);

    /// Replaces the lobby player list.
    fn set_player_list(&mut self, players: Vec<PlayerEntry>);

    /// Another player has invited us to a game.
    fn set_inviting_player(&mut self, opponent: String);

    /// We have invited `opponent` to a game.
    fn set_invited_player(&mut self, opponent: String);

    /// The invited player's answer, as sent by the server.
    fn set_invited_player_decision(&mut self, decision: i64);

    /// A game has started and we play `color`.
    fn set_game_started(&mut self, color: Color);

    /// Replaces the board.
    fn set_board(&mut self, board: Board);

    /// Whether it is our turn.
    fn set_player_move(&mut self, your_move: bool);

    /// The final result of the game.
    fn set_game_result(&mut self, winner: String, reason: Option<String>);

    /// Appends a line to the game log.
    fn log_event(&mut self, message: &str, level: LogLevel);

    /// Empties the game log.
    fn clear_log(&mut self);

    /// The transport opened, failed, or closed. Default: ignored.
    fn connection_changed(&mut self, _status: ConnectionStatus) {}
}
