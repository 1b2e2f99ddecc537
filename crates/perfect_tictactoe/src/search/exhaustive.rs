//! Reference minimax: every line of play, no pruning, no memoization.

use super::{terminal_score, winning_move, SearchResult, SearchStats, SearchStrategy};
use crate::rules::evaluate;
use crate::{Board, Mark, Position};

/// Full-depth minimax. From the empty board this visits every one of the
/// 549 946 reachable game-tree nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exhaustive;

impl SearchStrategy for Exhaustive {
    fn search(
        &self,
        board: &Board,
        searching: Mark,
        opponent: Mark,
        stats: &mut SearchStats,
    ) -> SearchResult {
        if let Some(pos) = winning_move(board, searching) {
            stats.visit();
            return SearchResult::new(Some(pos), 1);
        }
        negamax(board, searching, opponent, stats)
    }

    fn name(&self) -> &'static str {
        "exhaustive"
    }
}

fn negamax(board: &Board, searching: Mark, opponent: Mark, stats: &mut SearchStats) -> SearchResult {
    stats.visit();

    if let Some(score) = terminal_score(&evaluate(board), searching) {
        return SearchResult::new(None, score);
    }

    let mut best: Option<SearchResult> = None;
    for pos in Position::valid_moves(board) {
        let child = board.with_mark(pos, searching);
        let score = -negamax(&child, opponent, searching, stats).score;
        if best.is_none_or(|b| score > b.score) {
            best = Some(SearchResult::new(Some(pos), score));
        }
    }

    best.unwrap_or(SearchResult::new(None, 0))
}
