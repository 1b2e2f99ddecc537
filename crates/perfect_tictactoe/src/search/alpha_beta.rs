//! Negamax with alpha-beta cut-offs.
//!
//! The root keeps an unbounded upper window and replaces its best move only
//! on a strictly higher score. A child that cannot beat the current best
//! returns a bound no higher than it, so the move selected (and its score)
//! is the one [`Exhaustive`](super::Exhaustive) selects.

use super::{terminal_score, winning_move, SearchResult, SearchStats, SearchStrategy};
use crate::rules::evaluate;
use crate::{Board, Mark, Position};

/// Strictly outside the -1..=1 score range.
const INF: i8 = 2;

/// Alpha-beta pruned negamax.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaBeta;

impl SearchStrategy for AlphaBeta {
    fn search(
        &self,
        board: &Board,
        searching: Mark,
        opponent: Mark,
        stats: &mut SearchStats,
    ) -> SearchResult {
        stats.visit();

        if let Some(score) = terminal_score(&evaluate(board), searching) {
            return SearchResult::new(None, score);
        }
        if let Some(pos) = winning_move(board, searching) {
            return SearchResult::new(Some(pos), 1);
        }

        let mut best: Option<SearchResult> = None;
        let mut alpha = -INF;
        for pos in Position::valid_moves(board) {
            let child = board.with_mark(pos, searching);
            let score = -negamax(&child, opponent, searching, -INF, -alpha, stats);
            if best.is_none_or(|b| score > b.score) {
                best = Some(SearchResult::new(Some(pos), score));
                alpha = alpha.max(score);
            }
            // Nothing beats a forced win.
            if alpha == 1 {
                break;
            }
        }

        best.unwrap_or(SearchResult::new(None, 0))
    }

    fn name(&self) -> &'static str {
        "alpha_beta"
    }
}

/// Fail-soft negamax value of `board` for `searching` within `(alpha, beta)`.
fn negamax(
    board: &Board,
    searching: Mark,
    opponent: Mark,
    mut alpha: i8,
    beta: i8,
    stats: &mut SearchStats,
) -> i8 {
    stats.visit();

    if let Some(score) = terminal_score(&evaluate(board), searching) {
        return score;
    }

    let mut best = -INF;
    for pos in Position::valid_moves(board) {
        let child = board.with_mark(pos, searching);
        let score = -negamax(&child, opponent, searching, -beta, -alpha, stats);
        best = best.max(score);
        alpha = alpha.max(best);
        if alpha >= beta {
            break;
        }
    }

    if best == -INF { 0 } else { best }
}
