//! Handle for driving a running session from another task.
//!
//! [`ClientSession::run`](crate::ClientSession::run) owns the session, so a
//! UI running elsewhere cannot call its methods directly. Instead it holds a
//! [`SessionHandle`] and sends [`Action`]s; the session executes them on its
//! own task, one per loop turn, with the same readiness checks as a direct
//! call.

use checkerwire_protocol::Square;
use tokio::sync::mpsc;

use crate::SessionError;

/// A user action for the session to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Login { username: String, password: String },
    Register { username: String, password: String },
    GetPlayerList,
    PollPlayerList,
    StopPollingPlayerList,
    RequestGame { opponent: String },
    RespondForGameRequest { accept: bool },
    MoveChecker { from: Square, to: Square },
    GiveUp,
    /// Close the connection and end the session loop.
    Close,
}

/// Cheap to clone; wraps an `mpsc::Sender`.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<Action>,
}

impl SessionHandle {
    pub(crate) fn new(sender: mpsc::Sender<Action>) -> Self {
        Self { sender }
    }

    /// Queues an action for the session.
    ///
    /// # Errors
    /// Returns [`SessionError::HandleClosed`] if the session has stopped.
    pub async fn send(&self, action: Action) -> Result<(), SessionError> {
        self.sender
            .send(action)
            .await
            .map_err(|_| SessionError::HandleClosed)
    }

    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.send(Action::Login {
            username: username.into(),
            password: password.into(),
        })
        .await
    }

    pub async fn register(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.send(Action::Register {
            username: username.into(),
            password: password.into(),
        })
        .await
    }

    pub async fn get_player_list(&self) -> Result<(), SessionError> {
        self.send(Action::GetPlayerList).await
    }

    pub async fn poll_player_list(&self) -> Result<(), SessionError> {
        self.send(Action::PollPlayerList).await
    }

    pub async fn stop_polling_player_list(&self) -> Result<(), SessionError> {
        self.send(Action::StopPollingPlayerList).await
    }

    pub async fn request_game(&self, opponent: impl Into<String>) -> Result<(), SessionError> {
        self.send(Action::RequestGame {
            opponent: opponent.into(),
        })
        .await
    }

    pub async fn respond_for_game_request(&self, accept: bool) -> Result<(), SessionError> {
        self.send(Action::RespondForGameRequest { accept }).await
    }

    pub async fn move_checker(&self, from: Square, to: Square) -> Result<(), SessionError> {
        self.send(Action::MoveChecker { from, to }).await
    }

    pub async fn give_up(&self) -> Result<(), SessionError> {
        self.send(Action::GiveUp).await
    }

    /// Asks the session to close the connection and stop.
    pub async fn close(&self) -> Result<(), SessionError> {
        self.send(Action::Close).await
    }

    /// `true` once the session has stopped receiving actions.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Resolves once the session has stopped.
    pub async fn closed(&self) {
        self.sender.closed().await;
    }
}
