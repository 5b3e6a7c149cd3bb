//! The 8×8 board and its compact 64-character wire encoding.
//!
//! The server sends the whole board on every change as one string, row by
//! row, one character per square:
//!
//! ```text
//! O  empty square
//! C  black checker        E  black king
//! B  white checker        D  white king
//! ```
//!
//! Decoding never checks that the position is legal; the server is the
//! authority on game rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Color, ProtocolError};

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 8;

/// Number of characters in an encoded board.
pub const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// The symbol the server uses for an empty square.
pub const EMPTY_SYMBOL: char = 'O';

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// Whether a square holds anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupation {
    Occupied,
    Empty,
}

/// One decoded square.
///
/// Field names serialize in camelCase (`hasChecker`, `fieldOccupation`,
/// `isKing`) so a web view can consume the JSON directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// `"<row>-<col>"`, zero-based.
    pub index: String,
    pub has_checker: bool,
    /// `None` for empty squares and for symbols outside the alphabet.
    pub color: Option<Color>,
    #[serde(rename = "fieldOccupation")]
    pub occupation: Occupation,
    pub is_king: bool,
}

impl Cell {
    /// Decodes a single board symbol at the given position.
    ///
    /// Unknown symbols are not rejected: they come out colorless, and
    /// occupied because they are not the empty symbol.
    pub fn from_symbol(row: usize, col: usize, symbol: char) -> Self {
        let (color, is_king) = match symbol {
            'C' => (Some(Color::Black), false),
            'B' => (Some(Color::White), false),
            'E' => (Some(Color::Black), true),
            'D' => (Some(Color::White), true),
            _ => (None, false),
        };
        let empty = symbol == EMPTY_SYMBOL;

        Self {
            index: format!("{row}-{col}"),
            has_checker: !empty,
            color,
            occupation: if empty {
                Occupation::Empty
            } else {
                Occupation::Occupied
            },
            is_king,
        }
    }

    /// The wire symbol for this cell. Colorless occupied cells render as `?`.
    pub fn symbol(&self) -> char {
        match (self.occupation, self.color, self.is_king) {
            (Occupation::Empty, _, _) => EMPTY_SYMBOL,
            (Occupation::Occupied, Some(Color::Black), false) => 'C',
            (Occupation::Occupied, Some(Color::White), false) => 'B',
            (Occupation::Occupied, Some(Color::Black), true) => 'E',
            (Occupation::Occupied, Some(Color::White), true) => 'D',
            (Occupation::Occupied, None, _) => '?',
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupation == Occupation::Empty
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A decoded board: eight rows of eight cells, row-major.
///
/// Serializes as a plain array of arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    rows: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Decodes a 64-character board string.
    ///
    /// # Errors
    /// Returns [`ProtocolError::BoardLength`] unless `data` holds exactly
    /// 64 characters. Short or long input is never truncated or padded.
    pub fn decode(data: &str) -> Result<Self, ProtocolError> {
        let symbols: Vec<char> = data.chars().collect();
        if symbols.len() != BOARD_CELLS {
            return Err(ProtocolError::BoardLength(symbols.len()));
        }

        let rows = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                Cell::from_symbol(row, col, symbols[row * BOARD_SIZE + col])
            })
        });
        Ok(Self { rows })
    }

    /// Returns the cell at `(row, col)`, or `None` if out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.rows
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// Counts the checkers of one color, kings included.
    pub fn count(&self, color: Color) -> usize {
        self.cells().filter(|c| c.color == Some(color)).count()
    }

    /// Re-encodes the board into its 64-character wire form.
    pub fn encode(&self) -> String {
        self.cells().map(Cell::symbol).collect()
    }
}

/// Renders a text grid with row and column numbers, one wire symbol per
/// square and `.` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col}")?;
        }
        for (i, row) in self.rows.iter().enumerate() {
            write!(f, "\n{i} ")?;
            for cell in row {
                let symbol = if cell.is_empty() { '.' } else { cell.symbol() };
                write!(f, " {symbol}")?;
            }
        }
        Ok(())
    }
}
