//! Raw command codec: frames ⇄ `{ code, args }`.
//!
//! This is the lowest layer of the wire format. A command is a line of
//! `#`-separated fields; the first field names the command and the rest
//! are its positional arguments:
//!
//! ```text
//! LGN#alice#secret\n
//! ```
//!
//! Nothing here knows what a command *means*; that is the job of
//! [`ServerMessage`](crate::ServerMessage) and
//! [`ClientMessage`](crate::ClientMessage). The functions are pure and
//! never fail.

use std::fmt::{self, Write as _};

use crate::{Board, ProtocolError};

/// Separates fields within one frame.
pub const FIELD_SEPARATOR: char = '#';

/// Terminates every encoded command.
pub const LINE_TERMINATOR: char = '\n';

/// A frame split into its command code and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub code: String,
    pub args: Vec<String>,
}

impl Command {
    /// Returns argument `index`, or `None` if the frame was shorter.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Splits one frame on `#`.
///
/// The arity is not checked here. An empty frame yields an empty code.
pub fn decode_command(frame: &str) -> Command {
    let mut fields = frame.split(FIELD_SEPARATOR);
    let code = fields.next().unwrap_or_default().to_string();
    let args = fields.map(str::to_string).collect();
    Command { code, args }
}

/// Encodes a command: `code`, then `#arg` for each argument, then `\n`.
///
/// Arguments are written with their `Display` form and are not escaped; a
/// value containing `#` or a line break would corrupt the framing, so
/// callers must not pass one.
pub fn encode_command<I>(code: &str, args: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let mut line = String::from(code);
    for arg in args {
        // Writing to a String cannot fail.
        let _ = write!(line, "{FIELD_SEPARATOR}{arg}");
    }
    line.push(LINE_TERMINATOR);
    line
}

/// Decodes a 64-character board string. See [`Board::decode`].
///
/// # Errors
/// Returns [`ProtocolError::BoardLength`] for input of any other length.
pub fn decode_board(data: &str) -> Result<Board, ProtocolError> {
    Board::decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_login() {
        assert_eq!(encode_command("LGN", ["alice", "pw"]), "LGN#alice#pw\n");
    }

    #[test]
    fn test_encode_without_args() {
        assert_eq!(encode_command("LSP", Vec::<String>::new()), "LSP\n");
    }

    #[test]
    fn test_encode_numbers_use_display() {
        assert_eq!(encode_command("MOV", [2, 1, 3, 0]), "MOV#2#1#3#0\n");
    }

    #[test]
    fn test_decode_splits_code_and_args() {
        let cmd = decode_command("EOG#alice#resigned");
        assert_eq!(cmd.code, "EOG");
        assert_eq!(cmd.args, vec!["alice", "resigned"]);
        assert_eq!(cmd.arg(1), Some("resigned"));
        assert_eq!(cmd.arg(2), None);
    }

    #[test]
    fn test_decode_bare_code() {
        let cmd = decode_command("YMV");
        assert_eq!(cmd.code, "YMV");
        assert!(cmd.args.is_empty());
    }

    #[test]
    fn test_decode_keeps_empty_fields() {
        let cmd = decode_command("EOG#bob#");
        assert_eq!(cmd.args, vec!["bob", ""]);
    }

    #[test]
    fn test_round_trip_through_wire_form() {
        let cases: [(&str, Vec<&str>); 4] = [
            ("LGN", vec!["alice", "pw"]),
            ("LSP", vec![]),
            ("CHB", vec!["OCOCOCOC"]),
            ("EOG", vec!["white", "no moves left", ""]),
        ];
        for (code, args) in cases {
            let line = encode_command(code, &args);
            let cmd = decode_command(line.trim_end_matches(LINE_TERMINATOR));
            assert_eq!(cmd.code, code);
            assert_eq!(cmd.args, args);
        }
    }
}
