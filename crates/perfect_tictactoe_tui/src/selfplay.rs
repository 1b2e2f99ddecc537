//! Headless game with the computer on both sides.

use anyhow::{bail, Result};
use perfect_tictactoe::{run_search, GameMode, GameSession, SearchKind};
use tracing::{info, instrument};

/// Plays one game where every move comes from `search`.
///
/// Runs in two-player mode so the session accepts moves for both marks.
#[instrument]
pub fn play_out(search: SearchKind) -> Result<GameSession> {
    let mut session = GameSession::new(GameMode::TwoPlayer);
    while !session.outcome().is_terminal() {
        let mark = session.next_to_move();
        let result = run_search(&search, session.board(), mark, mark.opponent());
        let Some(pos) = result.index else {
            bail!("Search returned no move for {} on an open board", mark);
        };
        if let Some(reason) = session.play_move(pos.to_index(), false).rejection() {
            bail!("Search chose an illegal move {}: {}", pos, reason);
        }
    }
    info!(outcome = %session.outcome(), moves = session.current_step(), "Self-play finished");
    Ok(session)
}

/// Renders the moves, final board and outcome of a finished game.
pub fn report(session: &GameSession) -> String {
    let mut out = String::new();
    for step in 1..session.history().len() {
        if let Some(mv) = session.move_at(step) {
            out.push_str(&format!("{:>2}. {}\n", step, mv));
        }
    }
    out.push('\n');
    out.push_str(&session.board().display());
    out.push_str("\n\n");
    out.push_str(&session.outcome().to_string());
    out
}
