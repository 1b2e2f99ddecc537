//! Game session: mode, time-travelling history and turn rules.
//!
//! The session stores only the history, the displayed step and a few flags.
//! Everything else (outcome, whose move it is, whether the computer should
//! play) is recomputed from the displayed board on every call.

mod invariants;
mod transition;

pub use invariants::{
    AlternatingTurns, GrowingHistory, Invariant, InvariantSet, InvariantViolation,
    SessionInvariants, StepInBounds,
};
pub use transition::{Move, Rejection, Transition};

use crate::rules::{evaluate, Outcome};
use crate::search::{self, SearchStrategy};
use crate::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who plays O.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameMode {
    /// A human plays X, the computer plays O.
    #[default]
    SinglePlayer,
    /// Two humans share the board.
    TwoPlayer,
}

impl GameMode {
    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Self::SinglePlayer => "vs Computer",
            Self::TwoPlayer => "Two Players",
        }
    }

    /// Toggles between the two modes.
    pub fn toggle(self) -> Self {
        match self {
            Self::SinglePlayer => Self::TwoPlayer,
            Self::TwoPlayer => Self::SinglePlayer,
        }
    }
}

/// Presentation theme. Carried by the session, ignored by the rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Theme {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Toggles between light and dark.
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// One recorded position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The board after this step.
    pub board: Board,
    /// The mark to move from this board.
    pub next: Mark,
}

impl HistoryEntry {
    /// The empty board with X to move.
    pub fn initial() -> Self {
        Self {
            board: Board::new(),
            next: Mark::X,
        }
    }
}

/// Whose move the displayed position is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The displayed board is won or drawn.
    Finished(Outcome),
    /// A human should play this mark.
    Human(Mark),
    /// The computer should play but nothing has been scheduled yet.
    AwaitingAi,
    /// A computer move is scheduled.
    AiThinking,
}

/// Proof that a computer move was scheduled for a particular session
/// generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTicket {
    generation: u64,
}

impl AiTicket {
    /// The generation the ticket was issued in.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A game in progress, with its full history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    mode: GameMode,
    history: Vec<HistoryEntry>,
    current_step: usize,
    ai_pending: bool,
    generation: u64,
    theme: Theme,
}

impl GameSession {
    /// Starts a new game in `mode`: empty board, X to move.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            history: vec![HistoryEntry::initial()],
            current_step: 0,
            ai_pending: false,
            generation: 0,
            theme: Theme::default(),
        }
    }

    /// Sets the starting theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// The current mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Every recorded step, including ones after the displayed step.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Index of the displayed step.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// The displayed entry.
    pub fn current(&self) -> &HistoryEntry {
        &self.history[self.current_step]
    }

    /// The displayed board.
    pub fn board(&self) -> &Board {
        &self.current().board
    }

    /// The mark to move on the displayed board.
    pub fn next_to_move(&self) -> Mark {
        self.current().next
    }

    /// Outcome of the displayed board.
    pub fn outcome(&self) -> Outcome {
        evaluate(self.board())
    }

    /// True while a computer move is scheduled.
    pub fn is_ai_pending(&self) -> bool {
        self.ai_pending
    }

    /// Bumped by every reset or jump.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The presentation theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips the theme. Never touches the game.
    #[instrument(skip(self))]
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        debug!(theme = %self.theme, "Theme toggled");
        self.theme
    }

    /// True when O is the computer's mark in this mode.
    fn is_ai_mark(&self, mark: Mark) -> bool {
        self.mode == GameMode::SinglePlayer && mark == Mark::O
    }

    /// Derives whose move the displayed position is waiting for.
    pub fn turn(&self) -> Turn {
        let outcome = self.outcome();
        if outcome.is_terminal() {
            Turn::Finished(outcome)
        } else if self.is_ai_mark(self.next_to_move()) {
            if self.ai_pending {
                Turn::AiThinking
            } else {
                Turn::AwaitingAi
            }
        } else {
            Turn::Human(self.next_to_move())
        }
    }

    /// Status text for the displayed position.
    pub fn status_line(&self) -> String {
        match self.outcome() {
            Outcome::Ongoing => format!("Next player: {}", self.next_to_move()),
            outcome => outcome.to_string(),
        }
    }

    /// The move that produced `step`, found by comparing it with the step
    /// before. Step 0 has none.
    pub fn move_at(&self, step: usize) -> Option<Move> {
        let before = self.history.get(step.checked_sub(1)?)?;
        let after = self.history.get(step)?;
        Position::ALL
            .into_iter()
            .find(|pos| before.board.get(*pos) != after.board.get(*pos))
            .map(|pos| Move::new(before.next, pos))
    }

    /// Plays `cell_index` for the mark to move.
    ///
    /// Leaves the session untouched and returns the reason when the move is
    /// not allowed. A move played from an earlier step discards every later
    /// step before the new one is appended.
    #[instrument(skip(self), fields(step = self.current_step, mode = %self.mode))]
    pub fn play_move(&mut self, cell_index: usize, is_ai_move: bool) -> Transition {
        let Some(pos) = Position::from_index(cell_index) else {
            return self.reject(Rejection::OutOfBounds(cell_index));
        };
        if self.outcome().is_terminal() {
            return self.reject(Rejection::GameOver);
        }
        if !self.board().is_empty(pos) {
            return self.reject(Rejection::SquareOccupied(pos));
        }

        let mark = self.next_to_move();
        if is_ai_move {
            if !self.is_ai_mark(mark) {
                return self.reject(Rejection::NotAiTurn);
            }
        } else if self.ai_pending {
            return self.reject(Rejection::AiThinking);
        } else if self.is_ai_mark(mark) {
            return self.reject(Rejection::AiTurn);
        }

        let entry = HistoryEntry {
            board: self.board().with_mark(pos, mark),
            next: mark.opponent(),
        };
        self.history.truncate(self.current_step + 1);
        self.history.push(entry);
        self.current_step = self.history.len() - 1;
        if is_ai_move {
            self.ai_pending = false;
        }

        info!(
            mark = %mark,
            position = %pos,
            step = self.current_step,
            outcome = %self.outcome(),
            "Move played"
        );
        self.assert_invariants();
        Transition::Applied
    }

    /// Displays `step` without changing history.
    ///
    /// Any scheduled computer move is called off, since it was computed for
    /// a different board.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, step: usize) -> Transition {
        if step >= self.history.len() {
            return self.reject(Rejection::StepOutOfRange(step));
        }
        self.current_step = step;
        self.ai_pending = false;
        self.generation += 1;
        debug!(step, generation = self.generation, "Jumped in history");
        self.assert_invariants();
        Transition::Applied
    }

    /// Changes mode and starts a new game.
    #[instrument(skip(self))]
    pub fn switch_mode(&mut self, mode: GameMode) {
        info!(from = %self.mode, to = %mode, "Switching mode");
        self.mode = mode;
        self.reset();
    }

    /// Starts a new game in the current mode.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!(mode = %self.mode, "Restarting game");
        self.reset();
    }

    fn reset(&mut self) {
        self.history = vec![HistoryEntry::initial()];
        self.current_step = 0;
        self.ai_pending = false;
        self.generation += 1;
    }

    /// True when the computer should be asked for a move.
    pub fn needs_ai_move(&self) -> bool {
        self.turn() == Turn::AwaitingAi
    }

    /// Marks a computer move as scheduled.
    ///
    /// Human moves are refused until the ticket is completed or the session
    /// moves on to another generation.
    #[instrument(skip(self))]
    pub fn begin_ai_turn(&mut self) -> Option<AiTicket> {
        if !self.needs_ai_move() {
            return None;
        }
        self.ai_pending = true;
        debug!(generation = self.generation, "Computer move scheduled");
        Some(AiTicket {
            generation: self.generation,
        })
    }

    /// Searches for and plays the computer's move.
    ///
    /// A ticket from an earlier generation is discarded without searching.
    #[instrument(skip(self, strategy), fields(strategy = strategy.name()))]
    pub fn complete_ai_turn(
        &mut self,
        ticket: AiTicket,
        strategy: &dyn SearchStrategy,
    ) -> Transition {
        if ticket.generation != self.generation || !self.ai_pending {
            return self.reject(Rejection::StaleAiMove);
        }

        let mark = self.next_to_move();
        let result = search::run(strategy, self.board(), mark, mark.opponent());
        match result.index {
            Some(pos) => self.play_move(pos.to_index(), true),
            None => {
                warn!("Search found no move on an ongoing board");
                self.ai_pending = false;
                self.reject(Rejection::NotAiTurn)
            }
        }
    }

    fn reject(&self, reason: Rejection) -> Transition {
        debug!(%reason, "Action rejected");
        Transition::Rejected(reason)
    }

    fn assert_invariants(&self) {
        if let Err(violations) = SessionInvariants::check_all(self) {
            for violation in &violations {
                warn!(invariant = %violation.description, "Session invariant violated");
            }
            debug_assert!(violations.is_empty(), "Session invariants violated");
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}
