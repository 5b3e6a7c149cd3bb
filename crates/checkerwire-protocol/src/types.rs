//! Small value types shared by the codec, the board, and the messages.
//!
//! Everything here is plain data: cheap to clone, comparable, and
//! serializable so a presentation layer can forward it as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The color of a checker, or of the side a player controls.
///
/// A square with no checker has no color at all; that case is modelled as
/// `Option<Color>::None` rather than a third variant, so a `Color` always
/// means "one of the two sides".
///
/// Serialized in lowercase (`"black"`, `"white"`), the values a web view
/// reads from the cell JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Maps the one-letter color code used by `INI` (`C` → black,
    /// `B` → white). Any other code has no color.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Self::Black),
            "B" => Some(Self::White),
            _ => None,
        }
    }

    /// The opposing side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::White => write!(f, "white"),
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerEntry
// ---------------------------------------------------------------------------

/// One row of the lobby's player list, as reported by `LSP`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// The player's account name.
    pub name: String,
    /// `true` when the server reported status `A` for this player.
    pub online: bool,
}

impl PlayerEntry {
    /// Status flag the server uses for an available player.
    pub const ONLINE_STATUS: &'static str = "A";

    /// Builds a list from the flat `name, status, name, status, …` argument
    /// sequence. A trailing name without a status is listed as offline.
    pub fn from_pairs<S: AsRef<str>>(fields: &[S]) -> Vec<Self> {
        fields
            .chunks(2)
            .map(|pair| Self {
                name: pair[0].as_ref().to_string(),
                online: pair
                    .get(1)
                    .is_some_and(|status| status.as_ref() == Self::ONLINE_STATUS),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A board coordinate used by outbound moves.
///
/// `row` and `col` are zero-based and count from the top-left corner, the
/// same orientation the server uses for the board string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Prints `row-col`, the same form as a [`Cell`](crate::Cell) index.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_code() {
        assert_eq!(Color::from_code("C"), Some(Color::Black));
        assert_eq!(Color::from_code("B"), Some(Color::White));
        assert_eq!(Color::from_code("X"), None);
        assert_eq!(Color::from_code(""), None);
    }

    #[test]
    fn test_color_display_and_json() {
        assert_eq!(Color::Black.to_string(), "black");
        assert_eq!(serde_json::to_value(Color::White).unwrap(), "white");
        assert_eq!(Color::White.opposite(), Color::Black);
    }

    #[test]
    fn test_player_entries_from_pairs() {
        let players = PlayerEntry::from_pairs(&["alice", "A", "bob", "X"]);
        assert_eq!(
            players,
            vec![
                PlayerEntry { name: "alice".into(), online: true },
                PlayerEntry { name: "bob".into(), online: false },
            ]
        );
    }

    #[test]
    fn test_player_entries_trailing_name_is_offline() {
        let players = PlayerEntry::from_pairs(&["alice", "A", "carol"]);
        assert_eq!(players.len(), 2);
        assert_eq!(players[1].name, "carol");
        assert!(!players[1].online);
    }

    #[test]
    fn test_player_entries_empty() {
        let players = PlayerEntry::from_pairs::<&str>(&[]);
        assert!(players.is_empty());
    }

    #[test]
    fn test_square_display() {
        assert_eq!(Square::new(2, 5).to_string(), "2-5");
    }
}
