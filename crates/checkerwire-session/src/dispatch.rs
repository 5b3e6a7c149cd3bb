//! Command dispatcher: one decoded server message → model setter calls.
//!
//! The dispatcher keeps no state of its own. Each message is applied to the
//! [`GameModel`] independently, so the transition table below is the whole
//! story:
//!
//! ```text
//! LGN  set_user_logged_in
//! CRA  set_user_created
//! LSP  set_player_list
//! RP1  set_inviting_player
//! RP2  set_invited_player_decision
//! INI  set_game_started + log
//! CHB  set_board
//! YMV  set_player_move(true) + log
//! MOV  log, only when the move was rejected
//! EOG  log, set_game_result, clear_log
//! ERR  log at error level
//! ```

use checkerwire_protocol::{ProtocolError, ServerMessage};
use tracing::{debug, trace, warn};

use crate::{GameModel, LogLevel};

/// Applies one server message to the model.
pub fn dispatch<M: GameModel + ?Sized>(message: ServerMessage, model: &mut M) {
    match message {
        ServerMessage::Login { success } => model.set_user_logged_in(success),
        ServerMessage::CreateAccount { success } => model.set_user_created(success),
        ServerMessage::PlayerList(players) => model.set_player_list(players),
        ServerMessage::GameInvitation { opponent } => model.set_inviting_player(opponent),
        ServerMessage::InvitationDecision { decision } => {
            model.set_invited_player_decision(decision);
        }
        ServerMessage::GameStarted { color } => {
            model.set_game_started(color);
            model.log_event(&format!("Starting game as {color}"), LogLevel::Info);
        }
        ServerMessage::Board(board) => model.set_board(board),
        ServerMessage::YourMove => {
            model.set_player_move(true);
            model.log_event("Waiting for your move...", LogLevel::Info);
        }
        ServerMessage::MoveResult { accepted } => {
            if !accepted {
                model.log_event("Invalid move", LogLevel::Info);
            }
        }
        ServerMessage::GameOver { winner, reason } => {
            let text = match &reason {
                Some(reason) => format!("End of game, winner is: {winner} {reason}"),
                None => format!("End of game, winner is: {winner}"),
            };
            model.log_event(&text, LogLevel::Info);
            model.set_game_result(winner, reason);
            model.clear_log();
        }
        ServerMessage::Error { message } => {
            model.log_event(&format!("Error: {message}"), LogLevel::Error);
        }
    }
}

/// Decodes one frame and applies it.
///
/// A frame that does not decode changes nothing. Unknown command codes are
/// noted at debug level; malformed arguments at warn level. The error is
/// returned so callers can count or inspect it, but it is not fatal.
pub fn dispatch_frame<M: GameModel + ?Sized>(
    frame: &str,
    model: &mut M,
) -> Result<(), ProtocolError> {
    match ServerMessage::decode(frame) {
        Ok(message) => {
            trace!(code = message.code(), "dispatching frame");
            dispatch(message, model);
            Ok(())
        }
        Err(e @ ProtocolError::UnknownCommand(_)) => {
            debug!(error = %e, "ignoring frame");
            Err(e)
        }
        Err(e) => {
            warn!(error = %e, frame, "dropping malformed frame");
            Err(e)
        }
    }
}
