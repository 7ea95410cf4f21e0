//! Fallback for when neither the scanner nor the search has a confident move.

use crate::ai_player::EngineError;
use crate::game::{Board, Move};
use rand::Rng;

/// Picks a uniformly random empty cell by drawing cells until an empty one
/// comes up.
///
/// Fails with [`EngineError::NoEmptyCell`] instead of drawing forever when the
/// board is full.
pub fn random_empty_cell<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<Move, EngineError> {
    if board.is_full() {
        return Err(EngineError::NoEmptyCell);
    }

    let size = board.size();
    loop {
        let mv = Move::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if board.is_empty(mv) {
            return Ok(mv);
        }
    }
}
