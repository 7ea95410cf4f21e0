//! Static rating of a single move.
//!
//! Ratings are oriented towards [`Mark::X`]: positive values are good for `X`,
//! negative values are good for `O`. A rating with a magnitude above `1` is
//! decisive, i.e., the rated move ended the game with a win.

use crate::game::{Board, Mark, Move, Outcome};

/// Base value of a won game. Every ply needed to get there costs one point,
/// so that quick wins and late losses are preferred.
pub const WIN_SCORE: i32 = 100;

/// Whether the rating stands for a won or lost game rather than positional
/// desirability.
#[must_use]
pub const fn is_decisive(rating: i32) -> bool {
    rating.abs() > 1
}

/// Rates the move `mv` that was just made on `board`. `ply` counts the plies
/// from the root of the search, starting with 1.
///
/// The mark in `mv` is the mover. Returns `0` if `mv` is empty.
#[must_use]
pub fn rate(board: &Board, engine: Mark, mv: Move, ply: usize) -> i32 {
    let Some(mover) = board.get(mv) else {
        return 0;
    };

    let magnitude = match board.winner(mv) {
        Outcome::Won(_) => win_score(ply),
        Outcome::Draw => 0,
        Outcome::InProgress => positional_score(board, mv, mover),
    };

    let engine_view = if mover == engine { magnitude } else { -magnitude };
    if engine.is_maximizing() {
        engine_view
    } else {
        -engine_view
    }
}

fn win_score(ply: usize) -> i32 {
    let ply = i32::try_from(ply).unwrap_or(i32::MAX);
    WIN_SCORE.saturating_sub(ply).max(2)
}

/// `1` if the move extends a line that only the mover occupies or blocks a
/// line that only the opponent occupies, `0` otherwise.
fn positional_score(board: &Board, mv: Move, mover: Mark) -> i32 {
    let size = board.size();
    let shapes_a_line = board.lines_through(mv).any(|line| {
        let (mut own, mut theirs) = (0_usize, 0_usize);
        for cell in line.cells(size).filter(|&cell| cell != mv) {
            match board.get(cell) {
                Some(mark) if mark == mover => own += 1,
                Some(_) => theirs += 1,
                None => {}
            }
        }
        (own > 0 && theirs == 0) || (theirs > 0 && own == 0)
    });
    i32::from(shapes_a_line)
}
