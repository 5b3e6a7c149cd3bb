//! The client session: connection lifecycle plus the outbound API.
//!
//! A [`ClientSession`] exclusively owns everything with a lifetime in the
//! client: the transport connection, the application's [`GameModel`], the
//! deferred frame queue and the player-list poll timer. Nothing is shared
//! or global, so the readiness check that guards every outbound action is
//! a plain synchronous read of the connection's state.
//!
//! ```text
//!  transport ──payload──→ handle_payload ──frame──→ dispatch ──→ GameModel
//!                              │
//!                              └─ frames 2..N → FrameQueue → process_deferred
//!
//!  caller ──→ login / move_checker / … ──encode──→ transport
//! ```

use checkerwire_poll::{PollConfig, PollScheduler};
use checkerwire_protocol::{ClientMessage, Square};
use checkerwire_transport::{Connection, TransportError};
use tokio::sync::mpsc;

use crate::dispatch::dispatch_frame;
use crate::queue::FrameQueue;
use crate::{
    Action, ConnectionStatus, Credentials, GameModel, LogLevel, SessionError,
    SessionHandle,
};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for a client session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Player-list polling. Default: every 10 seconds.
    pub poll: PollConfig,

    /// Capacity of the action channel behind [`SessionHandle`]s.
    /// Default: 32.
    pub action_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll: PollConfig::default(),
            action_buffer: 32,
        }
    }
}

// ---------------------------------------------------------------------------
// ClientSession
// ---------------------------------------------------------------------------

/// One connection to the game server and everything it drives.
pub struct ClientSession<C, M> {
    conn: C,
    model: M,
    frames: FrameQueue,
    poll: PollScheduler,
    actions: mpsc::Receiver<Action>,
    action_tx: mpsc::Sender<Action>,
}

impl<C, M> ClientSession<C, M>
where
    C: Connection<Error = TransportError>,
    M: GameModel,
{
    /// Wraps an established connection.
    ///
    /// If the connection is already open, the model is told so right away.
    pub fn new(conn: C, mut model: M, config: SessionConfig) -> Self {
        let (action_tx, actions) = mpsc::channel(config.action_buffer.max(1));

        if conn.is_open() {
            tracing::info!(conn_id = %conn.id(), "connection open");
            model.connection_changed(ConnectionStatus::Open);
        }

        Self {
            conn,
            model,
            frames: FrameQueue::new(),
            poll: PollScheduler::new(config.poll),
            actions,
            action_tx,
        }
    }

    /// Returns a handle that can queue actions from another task.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle::new(self.action_tx.clone())
    }

    /// Whether the transport is open; every outbound action checks this.
    pub fn is_open(&self) -> bool {
        self.conn.is_open()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// Number of frames waiting for a later turn.
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Whether the player-list poll timer is armed.
    pub fn is_polling(&self) -> bool {
        self.poll.is_active()
    }

    // -- Inbound --

    /// Entry point for one transport payload.
    ///
    /// The first frame is dispatched before this returns; any further
    /// frames are queued and dispatched one per call to
    /// [`process_deferred`](Self::process_deferred).
    pub fn handle_payload(&mut self, payload: &str) {
        let Some(first) = self.frames.accept(payload) else {
            tracing::trace!("payload carried no frames");
            return;
        };
        if !self.frames.is_empty() {
            tracing::debug!(deferred = self.frames.len(), "sticky payload split");
        }
        let _ = dispatch_frame(first, &mut self.model);
    }

    /// Dispatches the oldest deferred frame. Returns `false` if there was
    /// none.
    pub fn process_deferred(&mut self) -> bool {
        match self.frames.pop() {
            Some(frame) => {
                let _ = dispatch_frame(&frame, &mut self.model);
                true
            }
            None => false,
        }
    }

    // -- Outbound --

    /// Records the credentials and sends `LGN#username#password`.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), SessionError> {
        if !self.ready("login") {
            return Ok(());
        }
        self.model.set_user(Credentials::new(username, password));
        self.send(ClientMessage::Login {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await
    }

    /// Records the credentials and sends `CRA#username#password`.
    pub async fn register(&mut self, username: &str, password: &str) -> Result<(), SessionError> {
        if !self.ready("register") {
            return Ok(());
        }
        self.model.set_user(Credentials::new(username, password));
        self.send(ClientMessage::Register {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await
    }

    /// Sends `LSP`.
    pub async fn get_player_list(&mut self) -> Result<(), SessionError> {
        if !self.ready("get_player_list") {
            return Ok(());
        }
        self.send(ClientMessage::ListPlayers).await
    }

    /// Starts, or restarts, the repeating player-list request.
    ///
    /// The first request goes out one interval from now. Calling this again
    /// replaces the running timer rather than adding a second one.
    pub fn poll_player_list(&mut self) {
        self.poll.start();
    }

    /// Cancels the player-list timer, if any.
    pub fn stop_polling_player_list(&mut self) {
        self.poll.stop();
    }

    /// Same as [`stop_polling_player_list`](Self::stop_polling_player_list).
    pub fn cancel_poll(&mut self) {
        self.poll.stop();
    }

    /// Records the invited player and sends `RFP#opponent`.
    pub async fn request_game(&mut self, opponent: &str) -> Result<(), SessionError> {
        if !self.ready("request_game") {
            return Ok(());
        }
        self.model.set_invited_player(opponent.to_string());
        self.send(ClientMessage::RequestGame {
            opponent: opponent.to_string(),
        })
        .await
    }

    /// Answers an invitation with `RP1#1` or `RP1#0`.
    pub async fn respond_for_game_request(&mut self, accept: bool) -> Result<(), SessionError> {
        if !self.ready("respond_for_game_request") {
            return Ok(());
        }
        self.send(ClientMessage::RespondToInvitation { accept }).await
    }

    /// Sends `MOV` with both squares' coordinates and logs the move.
    pub async fn move_checker(&mut self, from: Square, to: Square) -> Result<(), SessionError> {
        if !self.ready("move_checker") {
            return Ok(());
        }
        self.send(ClientMessage::Move { from, to }).await?;
        self.model
            .log_event(&format!("You moved from {from} to {to}"), LogLevel::Info);
        Ok(())
    }

    /// Sends `GVU`.
    pub async fn give_up(&mut self) -> Result<(), SessionError> {
        if !self.ready("give_up") {
            return Ok(());
        }
        self.send(ClientMessage::GiveUp).await
    }

    /// Stops polling, drops deferred frames, and closes the transport.
    ///
    /// The model always hears `Closed`. If the transport failed to close
    /// cleanly it hears `Error` first, and the error is returned.
    pub async fn close(&mut self) -> Result<(), SessionError> {
        self.poll.stop();
        self.frames.clear();
        let result = self.conn.close().await.map_err(SessionError::Transport);
        if let Err(e) = &result {
            tracing::warn!(conn_id = %self.conn.id(), error = %e, "transport close failed");
            self.model
                .connection_changed(ConnectionStatus::Error(e.to_string()));
        }
        self.model.connection_changed(ConnectionStatus::Closed);
        tracing::info!(conn_id = %self.conn.id(), "session closed");
        result
    }

    /// Executes one action. Returns `true` if the session should stop.
    ///
    /// [`Action::Close`] always returns `Ok(true)`, even when the transport
    /// fails to close.
    pub async fn apply(&mut self, action: Action) -> Result<bool, SessionError> {
        match action {
            Action::Login { username, password } => self.login(&username, &password).await?,
            Action::Register { username, password } => {
                self.register(&username, &password).await?;
            }
            Action::GetPlayerList => self.get_player_list().await?,
            Action::PollPlayerList => self.poll_player_list(),
            Action::StopPollingPlayerList => self.stop_polling_player_list(),
            Action::RequestGame { opponent } => self.request_game(&opponent).await?,
            Action::RespondForGameRequest { accept } => {
                self.respond_for_game_request(accept).await?;
            }
            Action::MoveChecker { from, to } => self.move_checker(from, to).await?,
            Action::GiveUp => self.give_up().await?,
            Action::Close => {
                // Already reported to the model; the session stops either way.
                let _ = self.close().await;
                return Ok(true);
            }
        }
        Ok(false)
    }

    // -- Event loop --

    /// Runs the session until the connection closes or a
    /// [`Action::Close`] arrives, then returns the model.
    ///
    /// Each loop turn handles exactly one of: an inbound payload, one
    /// deferred frame, a due poll, or one action. When several are ready
    /// the choice between them is random, so deferred frames interleave
    /// with other work instead of running as a batch.
    ///
    /// Transport failures are reported to the model and end the loop, after
    /// any frames still deferred have been dispatched. A failed send from
    /// an action is reported and the loop continues.
    pub async fn run(mut self) -> Result<M, SessionError> {
        let conn_id = self.conn.id();
        tracing::debug!(%conn_id, "session loop started");

        loop {
            tokio::select! {
                received = self.conn.recv() => match received {
                    Ok(Some(payload)) => {
                        tracing::trace!(%conn_id, bytes = payload.len(), "payload received");
                        self.handle_payload(&payload);
                    }
                    Ok(None) => {
                        tracing::info!(%conn_id, "connection closed by server");
                        self.drain_deferred();
                        self.poll.stop();
                        self.model.connection_changed(ConnectionStatus::Closed);
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(%conn_id, error = %e, "connection failed");
                        self.drain_deferred();
                        self.poll.stop();
                        self.model.connection_changed(ConnectionStatus::Error(e.to_string()));
                        self.model.connection_changed(ConnectionStatus::Closed);
                        break;
                    }
                },

                _ = std::future::ready(()), if !self.frames.is_empty() => {
                    self.process_deferred();
                }

                info = self.poll.wait_for_poll() => {
                    tracing::trace!(poll = info.poll, "polling player list");
                    if let Err(e) = self.get_player_list().await {
                        self.report_send_failure(&e);
                    }
                }

                Some(action) = self.actions.recv() => {
                    match self.apply(action).await {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => self.report_send_failure(&e),
                    }
                }
            }
        }

        tracing::debug!(%conn_id, "session loop ended");
        Ok(self.model)
    }

    // -- Internals --

    /// Frames that arrived before the transport went away still apply.
    fn drain_deferred(&mut self) {
        while self.process_deferred() {}
    }

    /// The readiness check. Logs and returns `false` when not open.
    fn ready(&self, action: &'static str) -> bool {
        let open = self.conn.is_open();
        if !open {
            tracing::debug!(
                action,
                state = %self.conn.ready_state(),
                "connection not open, action skipped"
            );
        }
        open
    }

    async fn send(&mut self, message: ClientMessage) -> Result<(), SessionError> {
        let line = message.encode();
        tracing::debug!(code = message.code(), "sending command");
        self.conn.send(&line).await?;
        Ok(())
    }

    fn report_send_failure(&mut self, error: &SessionError) {
        tracing::warn!(error = %error, "send failed");
        self.model
            .connection_changed(ConnectionStatus::Error(error.to_string()));
    }
}
