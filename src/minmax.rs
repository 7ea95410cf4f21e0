//! Bounded-depth game-tree search.
//!
//! Every sequence of moves up to the ply limit is enumerated depth-first, in
//! row-major order, with the engine moving on even plies and the opponent on
//! odd plies. The ratings of the moves along a path are summed up and the best
//! path decides which first move is recommended.
//!
//! As soon as a move at a node rates as decisive (see
//! [`heuristic::is_decisive`]) the node stops exploring its remaining moves.
//! This shortcut is not alpha-beta pruning and can miss better siblings.

use crate::game::{Board, Mark, Move};
use crate::heuristic;
use log::trace;

/// Best path found so far during one search.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct BestMove {
    /// First move of the best path. `None` until a path with a non-neutral
    /// rating was recorded.
    pub mv: Option<Move>,
    /// Summed ratings along the best path.
    pub rating: i32,
}

impl BestMove {
    #[must_use]
    pub const fn neutral() -> Self {
        Self { mv: None, rating: 0 }
    }

    /// Replaces the best path if `rating` is strictly better for `engine`.
    /// On ties the earlier path stays.
    fn offer(&mut self, engine: Mark, rating: i32, candidate: Option<Move>) {
        let better = if engine.is_maximizing() {
            rating > self.rating
        } else {
            rating < self.rating
        };
        if better {
            self.rating = rating;
            self.mv = candidate;
        }
    }
}

impl Default for BestMove {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Per-node state of the recursion.
#[derive(Debug, Clone, Copy)]
struct SearchState {
    /// Plies still to explore below this node.
    depth: usize,
    /// Summed ratings from the root down to this node.
    rating: i32,
    /// Root move this path descends from.
    candidate: Option<Move>,
}

#[derive(Debug)]
struct Searcher {
    engine: Mark,
    limit: usize,
    best: BestMove,
    leaves: usize,
    cutoffs: usize,
}

impl Searcher {
    fn explore(&mut self, board: &mut Board, state: SearchState) {
        if state.depth == 0 {
            self.leaf(state);
            return;
        }

        let ply = self.limit - state.depth;
        let mover = if ply % 2 == 0 {
            self.engine
        } else {
            self.engine.opponent()
        };

        let mut found_empty = false;
        for mv in Move::all(board.size()) {
            if !board.is_empty(mv) {
                continue;
            }
            found_empty = true;

            let candidate = if ply == 0 { Some(mv) } else { state.candidate };
            let cut = board.with_mark(mv, mover, |board| {
                let delta = heuristic::rate(board, self.engine, mv, ply + 1);
                let rating = state.rating + delta;
                if heuristic::is_decisive(delta) {
                    self.cutoffs += 1;
                    self.best.offer(self.engine, rating, candidate);
                    return true;
                }

                self.explore(
                    board,
                    SearchState {
                        depth: state.depth - 1,
                        rating,
                        candidate,
                    },
                );
                false
            });
            if cut {
                return;
            }
        }

        // board is full
        if !found_empty {
            self.leaf(state);
        }
    }

    fn leaf(&mut self, state: SearchState) {
        self.leaves += 1;
        self.best.offer(self.engine, state.rating, state.candidate);
    }
}

/// Runs the search on a non-full board and hands back the searcher with its
/// statistics.
fn run(board: &mut Board, engine: Mark, depth: usize) -> Searcher {
    let mut searcher = Searcher {
        engine,
        limit: depth,
        best: BestMove::neutral(),
        leaves: 0,
        cutoffs: 0,
    };
    searcher.explore(
        board,
        SearchState {
            depth,
            rating: 0,
            candidate: None,
        },
    );
    searcher
}

/// Searches `depth` plies ahead for the best first move of `engine`.
///
/// `board` is used as scratch space but holds the same marks as before when
/// this returns. On a full board, or with a `depth` of zero, the result is
/// [`BestMove::neutral`].
pub fn search(board: &mut Board, engine: Mark, depth: usize) -> BestMove {
    if board.is_full() {
        return BestMove::neutral();
    }

    let searcher = run(board, engine, depth);
    trace!(
        "search depth={depth} engine={engine}: {} leaves, {} cutoffs, best={:?}",
        searcher.leaves, searcher.cutoffs, searcher.best
    );
    searcher.best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn offer_keeps_first_of_equal_ratings() {
        let mut best = BestMove::neutral();
        best.offer(Mark::X, 0, Some(Move::new(0, 0)));
        assert_eq!(best, BestMove::neutral());

        best.offer(Mark::X, 3, Some(Move::new(0, 1)));
        best.offer(Mark::X, 3, Some(Move::new(0, 2)));
        best.offer(Mark::X, 2, Some(Move::new(1, 0)));
        assert_eq!(best.mv, Some(Move::new(0, 1)));
        assert_eq!(best.rating, 3);
    }

    #[test]
    fn offer_minimizes_for_o() {
        let mut best = BestMove::neutral();
        best.offer(Mark::O, 5, Some(Move::new(0, 0)));
        assert_eq!(best, BestMove::neutral());

        best.offer(Mark::O, -2, Some(Move::new(1, 1)));
        best.offer(Mark::O, -1, Some(Move::new(2, 2)));
        assert_eq!(best.mv, Some(Move::new(1, 1)));
        assert_eq!(best.rating, -2);
    }

    #[test]
    fn full_board_is_neutral() {
        let mut board = board("XOX/XOO/OXX");
        assert_eq!(search(&mut board, Mark::X, 5), BestMove::neutral());
    }

    #[test]
    fn zero_depth_is_neutral() {
        let mut board = board("X../.O./...");
        assert_eq!(search(&mut board, Mark::X, 0), BestMove::neutral());
    }

    #[test]
    fn depth_one_takes_the_win() {
        let mut board = board("XX./OO./...");
        let best = search(&mut board, Mark::X, 1);
        assert_eq!(best.mv, Some(Move::new(0, 2)));
        assert_eq!(best.rating, heuristic::WIN_SCORE - 1);
    }

    #[test]
    fn depth_one_takes_the_win_for_o() {
        let mut board = board("XX./OO./X..");
        let best = search(&mut board, Mark::O, 1);
        assert_eq!(best.mv, Some(Move::new(1, 2)));
        assert_eq!(best.rating, -(heuristic::WIN_SCORE - 1));
    }

    #[test]
    fn depth_one_prefers_shaping_moves() {
        // (0, 0) is the first cell that extends a line of `X`
        let mut board = board(".../.X./...");
        let best = search(&mut board, Mark::X, 1);
        assert_eq!(best.mv, Some(Move::new(0, 0)));
        assert_eq!(best.rating, 1);
    }

    #[test]
    fn decisive_move_skips_remaining_siblings() {
        // Only (0, 2) stops `O` from completing row 0. After any other first
        // move of `X`, the reply (0, 2) comes first in row-major order, wins
        // for `O` and ends that node before its three other replies are tried.
        let mut board = board("OO./X../..X");
        let searcher = run(&mut board, Mark::X, 2);
        assert_eq!(searcher.cutoffs, 4);
        // the four replies after the block are the only leaves
        assert_eq!(searcher.leaves, 4);
        // every leaf after the block rates 1 - 1 = 0, every cutoff is a loss
        assert_eq!(searcher.best, BestMove::neutral());
    }

    #[test]
    fn cutoff_is_recorded_with_its_root_move() {
        // filling the last cell draws, which is a leaf rather than a cutoff
        let mut board = board("XXO/OOX/XO.");
        let searcher = run(&mut board, Mark::X, 3);
        assert_eq!(searcher.cutoffs, 0);
        assert_eq!(searcher.leaves, 1);

        let mut board = self::board("XX./OO./...");
        let searcher = run(&mut board, Mark::X, 3);
        assert_eq!(searcher.cutoffs, 1);
        assert_eq!(searcher.leaves, 0);
        assert_eq!(searcher.best.mv, Some(Move::new(0, 2)));
    }

    #[test]
    fn board_is_restored() {
        for (s, engine) in [
            ("X../.O./...", Mark::X),
            ("X../.O./...", Mark::O),
            (".../.../...", Mark::X),
            ("XO../.X../..O./....", Mark::O),
        ] {
            let mut board = board(s);
            let before = board.clone();
            let best = search(&mut board, engine, 4);
            assert_eq!(board, before);
            if let Some(mv) = best.mv {
                assert!(before.is_empty(mv));
            }
        }
    }

    #[test]
    fn search_is_deterministic() {
        let mut board = board("X../.O./...");
        let first = search(&mut board, Mark::X, 5);
        let second = search(&mut board, Mark::X, 5);
        assert_eq!(first, second);
    }
}
