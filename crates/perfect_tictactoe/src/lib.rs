//! Perfect Tic-Tac-Toe - rules, perfect-play search and a game session
//! with time-travelling history.
//!
//! # Architecture
//!
//! - **Rules**: pure board evaluation ([`evaluate`], [`Outcome`])
//! - **Search**: full-depth negamax for the computer player ([`best_move`])
//! - **Session**: mode, history and turn rules ([`GameSession`])
//! - **Controller**: schedules delayed computer moves on Tokio and cancels
//!   them when the game is reset ([`GameController`])
//!
//! # Example
//!
//! ```
//! use perfect_tictactoe::{best_move, evaluate, Board, GameMode, GameSession, Mark, Outcome};
//!
//! let mut session = GameSession::new(GameMode::TwoPlayer);
//! session.play_move(4, false);
//! assert_eq!(evaluate(session.board()), Outcome::Ongoing);
//!
//! let reply = best_move(session.board(), Mark::O, Mark::X);
//! assert_eq!(reply.score, 0);
//! # let _ = Board::new();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod position;
mod rules;
mod search;
mod session;
mod types;

// Crate-level exports - Board types
pub use position::Position;
pub use types::{Board, Mark, Square};

// Crate-level exports - Rules
pub use rules::{evaluate, is_full, legal_moves, winning_line, Line, Outcome, LINES};

// Crate-level exports - Search
pub use search::{
    best_move, run as run_search, AlphaBeta, Exhaustive, SearchKind, SearchResult, SearchStats,
    SearchStrategy,
};

// Crate-level exports - Session
pub use session::{
    AiTicket, AlternatingTurns, GameMode, GameSession, GrowingHistory, HistoryEntry, Invariant,
    InvariantSet, InvariantViolation, Move, Rejection, SessionInvariants, StepInBounds, Theme,
    Transition, Turn,
};

// Crate-level exports - Controller and configuration
pub use config::{ConfigError, PlayConfig};
pub use controller::{GameController, GameEvent};
