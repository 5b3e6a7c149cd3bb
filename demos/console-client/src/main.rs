use checkerwire::prelude::*;
use checkerwire::DEFAULT_URL;
use tokio::io::{AsyncBufReadExt, BufReader};

// ---------------------------------------------------------------------------
// Console model
// ---------------------------------------------------------------------------

/// Prints every state change to stdout.
#[derive(Default)]
struct ConsoleModel {
    user: Option<String>,
    color: Option<Color>,
    log: Vec<String>,
}

impl GameModel for ConsoleModel {
    fn set_user(&mut self, credentials: Credentials) {
        self.user = Some(credentials.username);
    }

    fn set_user_logged_in(&mut self, logged_in: bool) {
        let user = self.user.as_deref().unwrap_or("?");
        if logged_in {
            println!("logged in as {user}");
        } else {
            println!("login failed for {user}");
        }
    }

    fn set_user_created(&mut self, created: bool) {
        if created {
            println!("account created, you can log in now");
        } else {
            println!("account could not be created");
        }
    }

    fn set_player_list(&mut self, players: Vec<PlayerEntry>) {
        println!("players ({}):", players.len());
        for player in players {
            let status = if player.online { "available" } else { "busy" };
            println!("  {:<16} {status}", player.name);
        }
    }

    fn set_inviting_player(&mut self, opponent: String) {
        println!("{opponent} invites you to a game (accept / decline)");
    }

    fn set_invited_player(&mut self, opponent: String) {
        println!("invitation sent to {opponent}");
    }

    fn set_invited_player_decision(&mut self, decision: i64) {
        if decision != 0 {
            println!("invitation accepted");
        } else {
            println!("invitation declined");
        }
    }

    fn set_game_started(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn set_board(&mut self, board: Board) {
        println!("{board}");
        if let Some(color) = self.color {
            println!(
                "{color}: {}  {}: {}",
                board.count(color),
                color.opposite(),
                board.count(color.opposite())
            );
        }
    }

    fn set_player_move(&mut self, your_move: bool) {
        if your_move {
            println!("> move r c r c");
        }
    }

    fn set_game_result(&mut self, _winner: String, _reason: Option<String>) {
        self.color = None;
    }

    fn log_event(&mut self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Info => println!("* {message}"),
            LogLevel::Error => eprintln!("! {message}"),
        }
        self.log.push(message.to_string());
    }

    fn clear_log(&mut self) {
        self.log.clear();
    }

    fn connection_changed(&mut self, status: ConnectionStatus) {
        match status {
            ConnectionStatus::Open => println!("connected"),
            ConnectionStatus::Error(e) => eprintln!("connection error: {e}"),
            ConnectionStatus::Closed => println!("disconnected"),
        }
    }
}

// ---------------------------------------------------------------------------
// Command line parsing
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Help,
    Action(Action),
}

const HELP: &str = "\
commands:
  login <user> <password>     register <user> <password>
  players                     poll | stop
  invite <player>             accept | decline
  move <row> <col> <row> <col>
  giveup                      quit";

fn parse_input(line: &str) -> Result<Option<Input>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Ok(None);
    };

    let action = match (command, args) {
        ("help", []) => return Ok(Some(Input::Help)),
        ("login", [user, password]) => Action::Login {
            username: user.to_string(),
            password: password.to_string(),
        },
        ("register", [user, password]) => Action::Register {
            username: user.to_string(),
            password: password.to_string(),
        },
        ("players", []) => Action::GetPlayerList,
        ("poll", []) => Action::PollPlayerList,
        ("stop", []) => Action::StopPollingPlayerList,
        ("invite", [opponent]) => Action::RequestGame {
            opponent: opponent.to_string(),
        },
        ("accept", []) => Action::RespondForGameRequest { accept: true },
        ("decline", []) => Action::RespondForGameRequest { accept: false },
        ("move", [fr, fc, tr, tc]) => Action::MoveChecker {
            from: Square::new(coordinate(fr)?, coordinate(fc)?),
            to: Square::new(coordinate(tr)?, coordinate(tc)?),
        },
        ("giveup", []) => Action::GiveUp,
        ("quit", []) => Action::Close,
        _ => return Err(format!("unrecognized input {line:?}, try `help`")),
    };
    Ok(Some(Input::Action(action)))
}

fn coordinate(word: &str) -> Result<u8, String> {
    match word.parse::<u8>() {
        Ok(n) if usize::from(n) < checkerwire::protocol::BOARD_SIZE => Ok(n),
        _ => Err(format!("coordinate must be 0-7, got {word:?}")),
    }
}

// ---------------------------------------------------------------------------
// Client bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    checkerwire::init_tracing();

    let url = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_URL.to_string());
    eprintln!("connecting to {url}");

    let session = ClientBuilder::new()
        .url(url)
        .connect(ConsoleModel::default())
        .await?;
    let handle = session.handle();
    let task = tokio::spawn(session.run());

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Ok(None) => {}
                    Ok(Some(Input::Help)) => println!("{HELP}"),
                    Ok(Some(Input::Action(action))) => {
                        let quit = action == Action::Close;
                        handle.send(action).await?;
                        if quit {
                            break;
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            _ = handle.closed() => break,
        }
    }

    if !handle.is_closed() {
        let _ = handle.close().await;
    }
    let model = task.await??;
    tracing::debug!(log_lines = model.log.len(), "console client finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(line: &str) -> Action {
        match parse_input(line) {
            Ok(Some(Input::Action(action))) => action,
            other => panic!("expected an action for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_line_is_ignored() {
        assert_eq!(parse_input("   "), Ok(None));
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_input("help"), Ok(Some(Input::Help)));
    }

    #[test]
    fn test_account_commands() {
        assert_eq!(
            action("login alice secret"),
            Action::Login { username: "alice".into(), password: "secret".into() }
        );
        assert_eq!(
            action("register bob pw"),
            Action::Register { username: "bob".into(), password: "pw".into() }
        );
    }

    #[test]
    fn test_lobby_commands() {
        assert_eq!(action("players"), Action::GetPlayerList);
        assert_eq!(action("poll"), Action::PollPlayerList);
        assert_eq!(action("stop"), Action::StopPollingPlayerList);
        assert_eq!(action("invite carol"), Action::RequestGame { opponent: "carol".into() });
        assert_eq!(action("accept"), Action::RespondForGameRequest { accept: true });
        assert_eq!(action("decline"), Action::RespondForGameRequest { accept: false });
    }

    #[test]
    fn test_game_commands() {
        assert_eq!(
            action("move 5 0 4 1"),
            Action::MoveChecker { from: Square::new(5, 0), to: Square::new(4, 1) }
        );
        assert_eq!(action("giveup"), Action::GiveUp);
        assert_eq!(action("quit"), Action::Close);
    }

    #[test]
    fn test_move_rejects_off_board_coordinates() {
        assert!(parse_input("move 8 0 4 1").is_err());
        assert!(parse_input("move a 0 4 1").is_err());
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        assert!(parse_input("login alice").is_err());
        assert!(parse_input("move 1 2 3").is_err());
        assert!(parse_input("dance").is_err());
    }

    #[test]
    fn test_model_clears_log_after_game() {
        let mut model = ConsoleModel::default();
        model.log_event("Starting game as black", LogLevel::Info);
        assert_eq!(model.log.len(), 1);
        model.clear_log();
        assert!(model.log.is_empty());
    }
}
