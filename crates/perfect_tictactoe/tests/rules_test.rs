//! Tests for board evaluation.

use perfect_tictactoe::{evaluate, Board, GameMode, GameSession, Mark, Outcome, Position, LINES};

fn board(cells: &str) -> Board {
    let mut marks = [None; 9];
    for (i, c) in cells.chars().filter(|c| !c.is_whitespace()).enumerate() {
        marks[i] = match c {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        };
    }
    Board::from_marks(marks)
}

#[test]
fn test_each_line_wins_for_both_marks() {
    for mark in [Mark::X, Mark::O] {
        for line in LINES {
            let filled = line
                .positions()
                .into_iter()
                .fold(Board::new(), |b, pos| b.with_mark(pos, mark));
            assert_eq!(evaluate(&filled), Outcome::Win { mark, line });
        }
    }
}

#[test]
fn test_full_boards_without_line_draw() {
    for cells in ["XOX XOO OXX", "XOX OXX OXO", "OXO XXO XOX"] {
        assert_eq!(evaluate(&board(cells)), Outcome::Draw, "{cells}");
    }
}

#[test]
fn test_open_boards_are_ongoing() {
    for cells in ["... ... ...", "X.. .O. ...", "XOX OXX OX."] {
        assert_eq!(evaluate(&board(cells)), Outcome::Ongoing, "{cells}");
    }
}

#[test]
fn test_win_on_last_square_is_not_a_draw() {
    let outcome = evaluate(&board("XOX OXO OXX"));
    assert_eq!(outcome.winner(), Some(Mark::X));
    assert_eq!(outcome.line().map(|l| l.indices()), Some([0, 4, 8]));
}

#[test]
fn test_completing_top_row_reports_it() {
    // X X _ / O O _ / _ _ _ with X to move.
    let mut session = GameSession::new(GameMode::TwoPlayer);
    for cell in [0, 3, 1, 4] {
        assert!(session.play_move(cell, false).is_applied());
    }
    assert_eq!(session.board(), &board("XX. OO. ..."));
    assert_eq!(session.next_to_move(), Mark::X);

    assert!(session.play_move(Position::TopRight.to_index(), false).is_applied());
    let outcome = evaluate(session.board());
    assert_eq!(outcome.winner(), Some(Mark::X));
    assert_eq!(outcome.line().map(|l| l.indices()), Some([0, 1, 2]));
}
