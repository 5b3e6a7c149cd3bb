//! Shared test doubles: an in-memory connection and a recording model.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use checkerwire_protocol::{Board, Color, PlayerEntry};
use checkerwire_session::{ConnectionStatus, Credentials, GameModel, LogLevel};
use checkerwire_transport::{Connection, ConnectionId, ReadyState, TransportError};
use tokio::sync::mpsc;

// =========================================================================
// MockConnection: the session's side of an in-memory link.
// =========================================================================

pub enum Inbound {
    Payload(String),
    Fail,
}

pub struct MockConnection {
    state: Arc<AtomicU8>,
    sent: Arc<Mutex<Vec<String>>>,
    fail_sends: Arc<AtomicBool>,
    fail_close: Arc<AtomicBool>,
    inbound: tokio::sync::Mutex<mpsc::UnboundedReceiver<Inbound>>,
}

/// The test's side: push payloads in, inspect what was sent.
#[derive(Clone)]
pub struct Remote {
    state: Arc<AtomicU8>,
    sent: Arc<Mutex<Vec<String>>>,
    fail_sends: Arc<AtomicBool>,
    fail_close: Arc<AtomicBool>,
    inbound: Arc<Mutex<Option<mpsc::UnboundedSender<Inbound>>>>,
}

impl MockConnection {
    pub fn open() -> (Self, Remote) {
        Self::with_state(ReadyState::Open)
    }

    pub fn with_state(state: ReadyState) -> (Self, Remote) {
        let state = Arc::new(AtomicU8::new(state as u8));
        let sent = Arc::new(Mutex::new(Vec::new()));
        let fail_sends = Arc::new(AtomicBool::new(false));
        let fail_close = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = Self {
            state: Arc::clone(&state),
            sent: Arc::clone(&sent),
            fail_sends: Arc::clone(&fail_sends),
            fail_close: Arc::clone(&fail_close),
            inbound: tokio::sync::Mutex::new(rx),
        };
        let remote = Remote {
            state,
            sent,
            fail_sends,
            fail_close,
            inbound: Arc::new(Mutex::new(Some(tx))),
        };
        (conn, remote)
    }
}

impl Connection for MockConnection {
    type Error = TransportError;

    async fn send(&self, text: &str) -> Result<(), TransportError> {
        if self.ready_state() != ReadyState::Open {
            return Err(TransportError::ConnectionClosed("mock is not open".into()));
        }
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::SendFailed(std::io::Error::other("mock send failure")));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn recv(&self) -> Result<Option<String>, TransportError> {
        let mut inbound = self.inbound.lock().await;
        match inbound.recv().await {
            Some(Inbound::Payload(text)) => Ok(Some(text)),
            Some(Inbound::Fail) => {
                self.state.store(ReadyState::Closed as u8, Ordering::SeqCst);
                Err(TransportError::ReceiveFailed(std::io::Error::other("mock receive failure")))
            }
            None => {
                self.state.store(ReadyState::Closed as u8, Ordering::SeqCst);
                Ok(None)
            }
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.state.store(ReadyState::Closed as u8, Ordering::SeqCst);
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(TransportError::SendFailed(std::io::Error::other("mock close failure")));
        }
        Ok(())
    }

    fn ready_state(&self) -> ReadyState {
        ReadyState::from_u8(self.state.load(Ordering::SeqCst))
    }

    fn id(&self) -> ConnectionId {
        ConnectionId::new(1)
    }
}

impl Remote {
    pub fn push(&self, payload: &str) {
        self.deliver(Inbound::Payload(payload.to_string()));
    }

    pub fn fail(&self) {
        self.deliver(Inbound::Fail);
    }

    /// Closes the inbound side, as if the server went away cleanly.
    pub fn hang_up(&self) {
        self.inbound.lock().unwrap().take();
    }

    fn deliver(&self, inbound: Inbound) {
        if let Some(tx) = self.inbound.lock().unwrap().as_ref() {
            let _ = tx.send(inbound);
        }
    }

    pub fn set_state(&self, state: ReadyState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    pub fn state(&self) -> ReadyState {
        ReadyState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// Makes the next `close` report an error. Inbound stays open, so a
    /// session that ignored the close would wait on `recv` forever.
    pub fn fail_close(&self, fail: bool) {
        self.fail_close.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

// =========================================================================
// RecordingModel: remembers every call, in order.
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    User(Credentials),
    LoggedIn(bool),
    Created(bool),
    PlayerList(Vec<PlayerEntry>),
    InvitingPlayer(String),
    InvitedPlayer(String),
    InvitedPlayerDecision(i64),
    GameStarted(Color),
    Board(Board),
    PlayerMove(bool),
    GameResult(String, Option<String>),
    Log(String, LogLevel),
    ClearLog,
    Connection(ConnectionStatus),
}

#[derive(Clone, Default)]
pub struct RecordingModel {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Returns and forgets everything recorded so far.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl GameModel for RecordingModel {
    fn set_user(&mut self, credentials: Credentials) {
        self.record(Event::User(credentials));
    }

    fn set_user_logged_in(&mut self, logged_in: bool) {
        self.record(Event::LoggedIn(logged_in));
    }

    fn set_user_created(&mut self, created: bool) {
        self.record(Event::Created(created));
    }

    fn set_player_list(&mut self, players: Vec<PlayerEntry>) {
        self.record(Event::PlayerList(players));
    }

    fn set_inviting_player(&mut self, opponent: String) {
        self.record(Event::InvitingPlayer(opponent));
    }

    fn set_invited_player(&mut self, opponent: String) {
        self.record(Event::InvitedPlayer(opponent));
    }

    fn set_invited_player_decision(&mut self, decision: i64) {
        self.record(Event::InvitedPlayerDecision(decision));
    }

    fn set_game_started(&mut self, color: Color) {
        self.record(Event::GameStarted(color));
    }

    fn set_board(&mut self, board: Board) {
        self.record(Event::Board(board));
    }

    fn set_player_move(&mut self, your_move: bool) {
        self.record(Event::PlayerMove(your_move));
    }

    fn set_game_result(&mut self, winner: String, reason: Option<String>) {
        self.record(Event::GameResult(winner, reason));
    }

    fn log_event(&mut self, message: &str, level: LogLevel) {
        self.record(Event::Log(message.to_string(), level));
    }

    fn clear_log(&mut self) {
        self.record(Event::ClearLog);
    }

    fn connection_changed(&mut self, status: ConnectionStatus) {
        self.record(Event::Connection(status));
    }
}

pub fn info(text: &str) -> Event {
    Event::Log(text.to_string(), LogLevel::Info)
}
