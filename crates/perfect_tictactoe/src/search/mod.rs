//! Perfect-play move search.
//!
//! Both strategies are negamax over the full game tree: scores are always
//! from the point of view of the mark being searched for, +1 for a forced
//! win, 0 for a draw and -1 for a loss. Scores carry no depth, so at the
//! root a move that wins on the spot is taken before any search. Otherwise
//! candidates are tried in index order and only a strictly better score
//! replaces the current best, so ties go to the lowest index.

mod alpha_beta;
mod exhaustive;

pub use alpha_beta::AlphaBeta;
pub use exhaustive::Exhaustive;

use super::rules::{evaluate, Outcome};
use super::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The move chosen by a search and its game-theoretic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct SearchResult {
    /// Chosen cell, `None` on a finished board.
    pub index: Option<Position>,
    /// +1 win, 0 draw, -1 loss for the searching mark.
    pub score: i8,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct SearchStats {
    /// Boards visited, root included.
    nodes: u64,
}

impl SearchStats {
    pub(crate) fn visit(&mut self) {
        self.nodes += 1;
    }
}

/// A way of picking the best move for a mark.
pub trait SearchStrategy {
    /// Searches `board` for `searching`, recording work in `stats`.
    fn search(
        &self,
        board: &Board,
        searching: Mark,
        opponent: Mark,
        stats: &mut SearchStats,
    ) -> SearchResult;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Which strategy to run, as named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumString, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SearchKind {
    /// Plain minimax over every line of play.
    Exhaustive,
    /// Minimax with alpha-beta cut-offs; picks the same moves.
    #[default]
    AlphaBeta,
}

impl SearchStrategy for SearchKind {
    fn search(
        &self,
        board: &Board,
        searching: Mark,
        opponent: Mark,
        stats: &mut SearchStats,
    ) -> SearchResult {
        match self {
            SearchKind::Exhaustive => Exhaustive.search(board, searching, opponent, stats),
            SearchKind::AlphaBeta => AlphaBeta.search(board, searching, opponent, stats),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            SearchKind::Exhaustive => Exhaustive.name(),
            SearchKind::AlphaBeta => AlphaBeta.name(),
        }
    }
}

/// Finds the best move for `searching` with the exhaustive reference search.
#[instrument(skip(board), fields(board = %board.display()))]
pub fn best_move(board: &Board, searching: Mark, opponent: Mark) -> SearchResult {
    run(&Exhaustive, board, searching, opponent)
}

/// Runs `strategy` and logs what it cost.
pub fn run<S: SearchStrategy + ?Sized>(
    strategy: &S,
    board: &Board,
    searching: Mark,
    opponent: Mark,
) -> SearchResult {
    let mut stats = SearchStats::default();
    let result = strategy.search(board, searching, opponent, &mut stats);
    debug!(
        strategy = strategy.name(),
        nodes = stats.nodes,
        index = ?result.index,
        score = result.score,
        "Search finished"
    );
    result
}

/// Lowest empty square that completes a line for `mark` right now.
pub(crate) fn winning_move(board: &Board, mark: Mark) -> Option<Position> {
    if evaluate(board).is_terminal() {
        return None;
    }
    Position::valid_moves(board)
        .into_iter()
        .find(|pos| evaluate(&board.with_mark(*pos, mark)).winner() == Some(mark))
}

/// Leaf value of a finished board for `searching`, `None` while ongoing.
pub(crate) fn terminal_score(outcome: &Outcome, searching: Mark) -> Option<i8> {
    match outcome {
        Outcome::Ongoing => None,
        Outcome::Draw => Some(0),
        Outcome::Win { mark, .. } if *mark == searching => Some(1),
        Outcome::Win { .. } => Some(-1),
    }
}
