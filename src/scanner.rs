//! Exact one-ply lookahead for moves that win immediately or must be blocked.

use crate::game::{Board, Mark, Move, Outcome};
use crate::heuristic;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Urgency {
    /// The engine completes a line.
    Win,
    /// The opponent would complete a line in that cell.
    Block,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ImmediateMove {
    pub urgency: Urgency,
    pub mv: Move,
    /// Rating of the engine's mark placed in `mv`.
    pub rating: i32,
}

/// Looks for a cell where `engine` wins right away, or else for a cell where
/// the opponent would win on its next move.
///
/// When several cells qualify, the last one in row-major order is taken. A win
/// is taken even if the opponent also threatens to win. Every speculative mark
/// is removed again, so `board` is unchanged when this returns.
pub fn scan(board: &mut Board, engine: Mark) -> Option<ImmediateMove> {
    let opponent = engine.opponent();
    let mut win = None;
    let mut block = None;

    for mv in Move::all(board.size()) {
        if !board.is_empty(mv) {
            continue;
        }

        if wins_with(board, mv, engine) {
            win = Some(mv);
        }
        if wins_with(board, mv, opponent) {
            block = Some(mv);
        }
    }

    match (win, block) {
        (Some(mv), _) => Some(immediate(board, engine, Urgency::Win, mv)),
        (None, Some(mv)) => Some(immediate(board, engine, Urgency::Block, mv)),
        (None, None) => None,
    }
}

fn wins_with(board: &mut Board, mv: Move, mark: Mark) -> bool {
    board.with_mark(mv, mark, |board| board.winner(mv) == Outcome::Won(mark))
}

fn immediate(board: &mut Board, engine: Mark, urgency: Urgency, mv: Move) -> ImmediateMove {
    let rating = board.with_mark(mv, engine, |board| heuristic::rate(board, engine, mv, 1));
    ImmediateMove {
        urgency,
        mv,
        rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn finds_own_win() {
        let mut board = board("XX./OO./...");
        let before = board.clone();
        let found = scan(&mut board, Mark::X).unwrap();
        assert_eq!(found.urgency, Urgency::Win);
        assert_eq!(found.mv, Move::new(0, 2));
        assert_eq!(found.rating, heuristic::WIN_SCORE - 1);
        assert_eq!(board, before);
    }

    #[test]
    fn win_beats_block_even_when_block_comes_first() {
        let mut board = board("OO./XX./...");
        let found = scan(&mut board, Mark::X).unwrap();
        assert_eq!(found.urgency, Urgency::Win);
        assert_eq!(found.mv, Move::new(1, 2));
    }

    #[test]
    fn finds_block() {
        let mut board = board("OO./X../..X");
        let found = scan(&mut board, Mark::X).unwrap();
        assert_eq!(found.urgency, Urgency::Block);
        assert_eq!(found.mv, Move::new(0, 2));
        assert!(found.rating > 0);

        // the same for an `O` engine: ratings point towards `X`
        let mut board = self::board("XX./O../..O");
        let found = scan(&mut board, Mark::O).unwrap();
        assert_eq!(found.urgency, Urgency::Block);
        assert_eq!(found.mv, Move::new(0, 2));
        assert!(found.rating < 0);
    }

    #[test]
    fn last_of_several_wins() {
        let mut board = board("XOX/OXO/...");
        let found = scan(&mut board, Mark::X).unwrap();
        assert_eq!(found.urgency, Urgency::Win);
        assert_eq!(found.mv, Move::new(2, 2));
    }

    #[test]
    fn last_of_several_blocks() {
        // `O` completes row 0 in (0, 2) and column 0 in (2, 0)
        let mut board = board("OO./O.X/.X.");
        let found = scan(&mut board, Mark::X).unwrap();
        assert_eq!(found.urgency, Urgency::Block);
        assert_eq!(found.mv, Move::new(2, 0));
    }

    #[test]
    fn nothing_urgent() {
        let mut board = board("X../.O./...");
        assert_eq!(scan(&mut board, Mark::X), None);
        assert_eq!(scan(&mut Board::new(4), Mark::O), None);
        assert_eq!(scan(&mut self::board("XOX/XOO/OXX"), Mark::X), None);
    }
}
