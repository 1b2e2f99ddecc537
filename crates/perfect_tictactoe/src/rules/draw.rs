//! Draw detection logic for tic-tac-toe.

use crate::Board;

/// True when no square is empty. Only a draw if nobody has a line.
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| s.mark().is_some())
}
