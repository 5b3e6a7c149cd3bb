//! Dispatcher tests: one frame in, the expected model calls out.

mod common;

use checkerwire_protocol::{Board, Color, PlayerEntry, ProtocolError};
use checkerwire_session::{dispatch_frame, LogLevel};
use common::{info, Event, RecordingModel};

const START_BOARD: &str =
    "OCOCOCOCCOCOCOCOOCOCOCOCOOOOOOOOOOOOOOOOBOBOBOBOOBOBOBOBBOBOBOBO";

fn run(frame: &str) -> (Result<(), ProtocolError>, Vec<Event>) {
    let mut model = RecordingModel::new();
    let result = dispatch_frame(frame, &mut model);
    (result, model.events())
}

// =========================================================================
// Account and lobby
// =========================================================================

#[test]
fn test_login_result() {
    assert_eq!(run("LGN#1").1, vec![Event::LoggedIn(true)]);
    assert_eq!(run("LGN#0").1, vec![Event::LoggedIn(false)]);
}

#[test]
fn test_create_account_result() {
    assert_eq!(run("CRA#1").1, vec![Event::Created(true)]);
    assert_eq!(run("CRA#0").1, vec![Event::Created(false)]);
}

#[test]
fn test_player_list() {
    let (result, events) = run("LSP#alice#A#bob#X");
    assert!(result.is_ok());
    assert_eq!(
        events,
        vec![Event::PlayerList(vec![
            PlayerEntry { name: "alice".into(), online: true },
            PlayerEntry { name: "bob".into(), online: false },
        ])]
    );
}

#[test]
fn test_empty_player_list() {
    assert_eq!(run("LSP").1, vec![Event::PlayerList(Vec::new())]);
}

#[test]
fn test_invitation_from_other_player() {
    assert_eq!(run("RP1#carol").1, vec![Event::InvitingPlayer("carol".into())]);
}

#[test]
fn test_invitation_decision_is_passed_through() {
    assert_eq!(run("RP2#1").1, vec![Event::InvitedPlayerDecision(1)]);
    assert_eq!(run("RP2#0").1, vec![Event::InvitedPlayerDecision(0)]);
}

// =========================================================================
// Game
// =========================================================================

#[test]
fn test_game_init_black() {
    assert_eq!(
        run("INI#C").1,
        vec![
            Event::GameStarted(Color::Black),
            info("Starting game as black"),
        ]
    );
}

#[test]
fn test_game_init_white() {
    assert_eq!(
        run("INI#B").1,
        vec![
            Event::GameStarted(Color::White),
            info("Starting game as white"),
        ]
    );
}

#[test]
fn test_board() {
    let (result, events) = run(&format!("CHB#{START_BOARD}"));
    assert!(result.is_ok());
    let expected = Board::decode(START_BOARD).unwrap();
    assert_eq!(events, vec![Event::Board(expected)]);
}

#[test]
fn test_your_move() {
    assert_eq!(
        run("YMV").1,
        vec![Event::PlayerMove(true), info("Waiting for your move...")]
    );
}

#[test]
fn test_accepted_move_is_silent() {
    let (result, events) = run("MOV#1");
    assert!(result.is_ok());
    assert!(events.is_empty());
}

#[test]
fn test_rejected_move_is_logged() {
    assert_eq!(run("MOV#0").1, vec![info("Invalid move")]);
}

#[test]
fn test_end_of_game_logs_then_records_then_clears() {
    assert_eq!(
        run("EOG#alice#resigned").1,
        vec![
            info("End of game, winner is: alice resigned"),
            Event::GameResult("alice".into(), Some("resigned".into())),
            Event::ClearLog,
        ]
    );
}

#[test]
fn test_end_of_game_without_reason() {
    assert_eq!(
        run("EOG#alice").1,
        vec![
            info("End of game, winner is: alice"),
            Event::GameResult("alice".into(), None),
            Event::ClearLog,
        ]
    );
}

#[test]
fn test_end_of_game_with_empty_reason() {
    assert_eq!(
        run("EOG#bob#").1,
        vec![
            info("End of game, winner is: bob"),
            Event::GameResult("bob".into(), None),
            Event::ClearLog,
        ]
    );
}

#[test]
fn test_error_is_logged_at_error_level() {
    assert_eq!(
        run("ERR#not your turn").1,
        vec![Event::Log("Error: not your turn".into(), LogLevel::Error)]
    );
}

// =========================================================================
// Rejected frames change nothing
// =========================================================================

#[test]
fn test_unknown_code_is_ignored() {
    let (result, events) = run("ZZZ#1");
    assert_eq!(result, Err(ProtocolError::UnknownCommand("ZZZ".into())));
    assert!(events.is_empty());
}

#[test]
fn test_missing_argument_is_dropped() {
    let (result, events) = run("RP1");
    assert!(matches!(result, Err(ProtocolError::MissingArgument { code: "RP1", index: 0 })));
    assert!(events.is_empty());
}

#[test]
fn test_non_numeric_flag_is_dropped() {
    let (result, events) = run("LGN#yes");
    assert!(matches!(result, Err(ProtocolError::InvalidArgument { code: "LGN", .. })));
    assert!(events.is_empty());
}

#[test]
fn test_short_board_is_dropped() {
    let (result, events) = run("CHB#OCOC");
    assert_eq!(result, Err(ProtocolError::BoardLength(4)));
    assert!(events.is_empty());
}

#[test]
fn test_unknown_color_is_dropped() {
    let (result, events) = run("INI#X");
    assert!(result.is_err());
    assert!(events.is_empty());
}
