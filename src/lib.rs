//! Move-selection engine for tic-tac-toe on square boards of any size.
//!
//! [`Engine::find_move`] first looks for a cell that wins right away or
//! blocks an immediate win of the opponent. If there is none, a bounded-depth
//! heuristic search picks the move, and if the search comes back without a
//! usable result, a random empty cell is chosen.

pub mod ai_player;
pub mod game;
pub mod heuristic;
pub mod minmax;
pub mod random;
pub mod scanner;
pub mod selfplay;

pub use ai_player::{DEFAULT_SEARCH_DEPTH, Decision, Engine, EngineConfig, EngineError, Source};
pub use game::{Board, BoardError, Game, GameError, Mark, Move, Outcome};
