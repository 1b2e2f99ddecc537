//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Nothing here is cached: the outcome of
//! a board is recomputed from its squares every time it is asked for.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{winning_line, Line, LINES};

use super::{Board, Mark, Position};
use serde::{Deserialize, Serialize};

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line is complete and at least one square is empty.
    Ongoing,
    /// `mark` completed `line`.
    Win {
        /// The winning mark.
        mark: Mark,
        /// The completed line.
        line: Line,
    },
    /// The board is full and no line is complete.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn line(&self) -> Option<Line> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// True for `Win` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::Win { mark, .. } => write!(f, "Winner: {}", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Evaluates a board.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, line)) = winning_line(board) {
        return Outcome::Win { mark, line };
    }
    if is_full(board) {
        return Outcome::Draw;
    }
    Outcome::Ongoing
}

/// Empty squares in index order, or nothing once the game is decided.
pub fn legal_moves(board: &Board) -> Vec<Position> {
    if evaluate(board).is_terminal() {
        return Vec::new();
    }
    Position::valid_moves(board)
}
