//! The client-side board: one row per accepted guess.

use std::fmt;

use guessword_protocol::{Feedback, LetterStatus, WORD_LEN};

use crate::Guess;

/// Number of rows on the board.
pub const BOARD_ROWS: usize = 5;

/// The display state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellStatus {
    #[default]
    Empty,
    Correct,
    Present,
    Absent,
}

impl From<LetterStatus> for CellStatus {
    fn from(status: LetterStatus) -> Self {
        match status {
            LetterStatus::Correct => Self::Correct,
            LetterStatus::Present => Self::Present,
            LetterStatus::Absent => Self::Absent,
        }
    }
}

/// One square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub letter: Option<char>,
    pub status: CellStatus,
}

impl Cell {
    /// Returns `true` if nothing has been written here.
    pub fn is_empty(&self) -> bool {
        self.letter.is_none()
    }
}

/// A 5×5 grid of guesses and their feedback.
///
/// ## Invariants
///
/// - Rows fill strictly top to bottom; `next_row` is the only cursor.
/// - A row is either fully empty or fully filled, never partial.
/// - A filled row never changes again.
///
/// Fields are private so the only mutation is [`Board::fill_next`],
/// which upholds all three.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    rows: [[Cell; WORD_LEN]; BOARD_ROWS],
    next_row: usize,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the row the next accepted guess will fill, or `None` when
    /// the board is full.
    pub fn next_row(&self) -> Option<usize> {
        (self.next_row < BOARD_ROWS).then_some(self.next_row)
    }

    /// Number of filled rows.
    pub fn filled_rows(&self) -> usize {
        self.next_row
    }

    /// Returns `true` when every row is filled.
    pub fn is_full(&self) -> bool {
        self.next_row >= BOARD_ROWS
    }

    /// Returns `true` when no row is filled.
    pub fn is_empty(&self) -> bool {
        self.next_row == 0
    }

    /// Returns row `index`, or `None` past the bottom.
    pub fn row(&self, index: usize) -> Option<&[Cell; WORD_LEN]> {
        self.rows.get(index)
    }

    /// Iterates over all rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; WORD_LEN]> {
        self.rows.iter()
    }

    /// Writes `guess` and `feedback` into the next empty row.
    ///
    /// Returns the index of the filled row, or `None` if the board was
    /// already full. A full board is not an error: the engine decides
    /// whether more guesses are allowed, and an extra response is simply
    /// dropped.
    pub fn fill_next(&mut self, guess: &Guess, feedback: &Feedback) -> Option<usize> {
        let index = self.next_row()?;
        let row = self.rows.get_mut(index)?;

        for ((cell, letter), status) in row.iter_mut().zip(guess.letters()).zip(feedback.iter()) {
            *cell = Cell {
                letter: Some(letter),
                status: status.into(),
            };
        }

        self.next_row += 1;
        Some(index)
    }
}

/// Renders the board as text, one row per line, three characters per cell:
///
/// ```text
/// [C]  correct
/// (R)  present
///  N   absent
///  _   empty
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let letter = cell.letter.unwrap_or('_');
                match cell.status {
                    CellStatus::Correct => write!(f, "[{letter}]")?,
                    CellStatus::Present => write!(f, "({letter})")?,
                    CellStatus::Absent | CellStatus::Empty => write!(f, " {letter} ")?,
                }
            }
        }
        Ok(())
    }
}
