//! Typed messages for both directions of the protocol.
//!
//! [`ServerMessage`] is everything the server can send us, produced from a
//! frame by a single parse step. [`ClientMessage`] is everything we can send
//! the server. Both are closed enums, so handling code can `match`
//! exhaustively instead of comparing strings.
//!
//! # The RP1 code
//!
//! `RP1` appears in both directions with different meanings: inbound it
//! announces an invitation from another player, outbound it answers one.
//! The wire code is kept for compatibility with existing servers, but the
//! two meanings are separate variants
//! ([`ServerMessage::GameInvitation`] and
//! [`ClientMessage::RespondToInvitation`]) and never share a type.

use crate::codec::{decode_command, encode_command, Command};
use crate::{Board, Color, PlayerEntry, ProtocolError, Square};

// ---------------------------------------------------------------------------
// Command codes
// ---------------------------------------------------------------------------

/// Wire codes, grouped by direction.
pub mod code {
    // Server → client
    pub const LOGIN: &str = "LGN";
    pub const CREATE_ACCOUNT: &str = "CRA";
    pub const PLAYER_LIST: &str = "LSP";
    pub const INVITATION: &str = "RP1";
    pub const INVITATION_DECISION: &str = "RP2";
    pub const GAME_INIT: &str = "INI";
    pub const BOARD: &str = "CHB";
    pub const YOUR_MOVE: &str = "YMV";
    pub const MOVE_RESULT: &str = "MOV";
    pub const END_OF_GAME: &str = "EOG";
    pub const ERROR: &str = "ERR";

    // Client → server (LGN, CRA, LSP and MOV are shared with the list above)
    pub const REQUEST_GAME: &str = "RFP";
    pub const RESPOND_TO_INVITATION: &str = "RP1";
    pub const GIVE_UP: &str = "GVU";
}

// ---------------------------------------------------------------------------
// ServerMessage
// ---------------------------------------------------------------------------

/// A message received from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// `LGN#<0|1>`: result of a login attempt.
    Login { success: bool },

    /// `CRA#<0|1>`: result of an account registration.
    CreateAccount { success: bool },

    /// `LSP#name#status#…`: the full lobby player list.
    PlayerList(Vec<PlayerEntry>),

    /// `RP1#<opponent>`: another player invites us to a game.
    GameInvitation { opponent: String },

    /// `RP2#<decision>`: the answer to an invitation we sent.
    ///
    /// The value is passed through unchanged; the server uses `1` for
    /// accepted and `0` for declined.
    InvitationDecision { decision: i64 },

    /// `INI#<C|B>`: a game has started and we play `color`.
    GameStarted { color: Color },

    /// `CHB#<64 symbols>`: the current board.
    Board(Board),

    /// `YMV`: it is our turn.
    YourMove,

    /// `MOV#<0|1>`: the server's verdict on our last move.
    MoveResult { accepted: bool },

    /// `EOG#<winner>#<reason>`: the game is over.
    ///
    /// `reason` is `None` when the field is absent or empty.
    GameOver {
        winner: String,
        reason: Option<String>,
    },

    /// `ERR#<message>`: a server-side error report.
    Error { message: String },
}

impl ServerMessage {
    /// Parses one frame (without its line terminator).
    ///
    /// # Errors
    /// - [`ProtocolError::UnknownCommand`] for a code outside the inbound
    ///   alphabet.
    /// - [`ProtocolError::MissingArgument`] when a required argument is
    ///   absent.
    /// - [`ProtocolError::InvalidArgument`] for a flag or number that is not
    ///   an integer, or an `INI` color code other than `C`/`B`.
    /// - [`ProtocolError::BoardLength`] for a `CHB` board that is not 64
    ///   characters.
    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        Self::try_from(decode_command(frame))
    }

    /// The wire code this message was decoded from.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Login { .. } => code::LOGIN,
            Self::CreateAccount { .. } => code::CREATE_ACCOUNT,
            Self::PlayerList(_) => code::PLAYER_LIST,
            Self::GameInvitation { .. } => code::INVITATION,
            Self::InvitationDecision { .. } => code::INVITATION_DECISION,
            Self::GameStarted { .. } => code::GAME_INIT,
            Self::Board(_) => code::BOARD,
            Self::YourMove => code::YOUR_MOVE,
            Self::MoveResult { .. } => code::MOVE_RESULT,
            Self::GameOver { .. } => code::END_OF_GAME,
            Self::Error { .. } => code::ERROR,
        }
    }
}

impl TryFrom<Command> for ServerMessage {
    type Error = ProtocolError;

    fn try_from(cmd: Command) -> Result<Self, ProtocolError> {
        let message = match cmd.code.as_str() {
            code::LOGIN => Self::Login {
                success: flag(&cmd, code::LOGIN, 0)?,
            },
            code::CREATE_ACCOUNT => Self::CreateAccount {
                success: flag(&cmd, code::CREATE_ACCOUNT, 0)?,
            },
            code::PLAYER_LIST => Self::PlayerList(PlayerEntry::from_pairs(&cmd.args)),
            code::INVITATION => Self::GameInvitation {
                opponent: required(&cmd, code::INVITATION, 0)?.to_string(),
            },
            code::INVITATION_DECISION => Self::InvitationDecision {
                decision: integer(&cmd, code::INVITATION_DECISION, 0)?,
            },
            code::GAME_INIT => {
                let raw = required(&cmd, code::GAME_INIT, 0)?;
                let color = Color::from_code(raw).ok_or_else(|| {
                    ProtocolError::InvalidArgument {
                        code: code::GAME_INIT,
                        value: raw.to_string(),
                        reason: "expected color code C or B",
                    }
                })?;
                Self::GameStarted { color }
            }
            code::BOARD => Self::Board(Board::decode(required(&cmd, code::BOARD, 0)?)?),
            code::YOUR_MOVE => Self::YourMove,
            code::MOVE_RESULT => Self::MoveResult {
                accepted: flag(&cmd, code::MOVE_RESULT, 0)?,
            },
            code::END_OF_GAME => Self::GameOver {
                winner: required(&cmd, code::END_OF_GAME, 0)?.to_string(),
                reason: cmd
                    .arg(1)
                    .filter(|reason| !reason.is_empty())
                    .map(str::to_string),
            },
            code::ERROR => ServerMessage::Error {
                message: required(&cmd, code::ERROR, 0)?.to_string(),
            },
            _ => return Err(ProtocolError::UnknownCommand(cmd.code.clone())),
        };
        Ok(message)
    }
}

fn required<'a>(
    cmd: &'a Command,
    code: &'static str,
    index: usize,
) -> Result<&'a str, ProtocolError> {
    cmd.arg(index)
        .ok_or(ProtocolError::MissingArgument { code, index })
}

fn integer(cmd: &Command, code: &'static str, index: usize) -> Result<i64, ProtocolError> {
    let raw = required(cmd, code, index)?;
    raw.trim()
        .parse()
        .map_err(|_| ProtocolError::InvalidArgument {
            code,
            value: raw.to_string(),
            reason: "expected an integer",
        })
}

/// A numeric flag: any non-zero integer is `true`.
fn flag(cmd: &Command, code: &'static str, index: usize) -> Result<bool, ProtocolError> {
    integer(cmd, code, index).map(|n| n != 0)
}

// ---------------------------------------------------------------------------
// ClientMessage
// ---------------------------------------------------------------------------

/// A message sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `LGN#<username>#<password>`
    Login { username: String, password: String },

    /// `CRA#<username>#<password>`
    Register { username: String, password: String },

    /// `LSP`
    ListPlayers,

    /// `RFP#<opponent>`: invite another player.
    RequestGame { opponent: String },

    /// `RP1#<0|1>`: answer an invitation.
    RespondToInvitation { accept: bool },

    /// `MOV#<from row>#<from col>#<to row>#<to col>`
    Move { from: Square, to: Square },

    /// `GVU`: resign the current game.
    GiveUp,
}

impl ClientMessage {
    /// The wire code for this message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Login { .. } => code::LOGIN,
            Self::Register { .. } => code::CREATE_ACCOUNT,
            Self::ListPlayers => code::PLAYER_LIST,
            Self::RequestGame { .. } => code::REQUEST_GAME,
            Self::RespondToInvitation { .. } => code::RESPOND_TO_INVITATION,
            Self::Move { .. } => code::MOVE_RESULT,
            Self::GiveUp => code::GIVE_UP,
        }
    }

    /// The positional arguments, already rendered as strings.
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Login { username, password } | Self::Register { username, password } => {
                vec![username.clone(), password.clone()]
            }
            Self::RequestGame { opponent } => vec![opponent.clone()],
            Self::RespondToInvitation { accept } => vec![u8::from(*accept).to_string()],
            Self::Move { from, to } => [from.row, from.col, to.row, to.col]
                .iter()
                .map(u8::to_string)
                .collect(),
            Self::ListPlayers | Self::GiveUp => Vec::new(),
        }
    }

    /// Encodes the message as one `\n`-terminated line.
    pub fn encode(&self) -> String {
        encode_command(self.code(), self.args())
    }
}
