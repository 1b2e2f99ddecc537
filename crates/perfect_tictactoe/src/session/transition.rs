//! Results of session operations.
//!
//! Illegal actions are routine in an interactive game (a click on a taken
//! square, a click while the computer is thinking), so they never become
//! errors. The session stays exactly as it was and reports why.

use crate::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A mark placed on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Why an action left the session unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Rejection {
    /// The cell index is not 0-8.
    #[display("Cell {} is off the board", _0)]
    OutOfBounds(usize),

    /// The displayed board is already won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The square is taken.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// A human tried to play O against the computer.
    #[display("It's the computer's turn")]
    AiTurn,

    /// A human tried to move while a computer move is scheduled.
    #[display("The computer is thinking")]
    AiThinking,

    /// A computer move arrived when the computer has no move to make.
    #[display("It's not the computer's turn")]
    NotAiTurn,

    /// History has no such step.
    #[display("History has no step {}", _0)]
    StepOutOfRange(usize),

    /// The session was reset or rewound after the computer move was scheduled.
    #[display("Scheduled computer move is out of date")]
    StaleAiMove,
}

/// What an operation did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The session changed.
    Applied,
    /// The session is unchanged.
    Rejected(Rejection),
}

impl Transition {
    /// True if the session changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied)
    }

    /// The rejection reason, if any.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Transition::Applied => None,
            Transition::Rejected(reason) => Some(*reason),
        }
    }
}
