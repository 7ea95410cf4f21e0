use crate::game::{Board, Mark, Move};
use crate::minmax;
use crate::random::random_empty_cell;
use crate::scanner::{self, Urgency};
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Plies the search looks ahead by default.
pub const DEFAULT_SEARCH_DEPTH: usize = 5;

#[derive(Debug, PartialEq, Clone, Copy, Eq, thiserror::Error)]
pub enum EngineError {
    /// `find_move` was asked for a move on a board without empty cells.
    #[error("board is full, no move possible")]
    BoardFull,
    /// The random fallback was asked to pick from a board without empty cells.
    #[error("no empty cell to pick from")]
    NoEmptyCell,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub struct EngineConfig {
    /// Plies explored by the search, counting the engine's own move.
    pub search_depth: usize,
    /// Seed of the fallback randomizer. Taken from the OS when `None`.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            seed: None,
        }
    }
}

/// Stage of the engine that produced a move.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum Source {
    Win,
    Block,
    Search,
    Random,
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub struct Decision {
    pub mv: Move,
    /// Rating behind the move, `0` for random picks.
    pub rating: i32,
    pub source: Source,
}

/// Computer player for one mark.
#[derive(Debug, Clone)]
pub struct Engine {
    mark: Mark,
    search_depth: usize,
    rng: StdRng,
}

impl Engine {
    #[must_use]
    pub fn new(mark: Mark) -> Self {
        Self::with_config(mark, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(mark: Mark, config: EngineConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            mark,
            search_depth: config.search_depth,
            rng,
        }
    }

    #[must_use]
    pub const fn mark(&self) -> Mark {
        self.mark
    }

    #[must_use]
    pub const fn search_depth(&self) -> usize {
        self.search_depth
    }

    /// Chooses the cell for the engine's next mark.
    ///
    /// The engine does not place the mark itself. `board` is used to try out
    /// moves but holds the same marks as before when this returns.
    pub fn find_move(&mut self, board: &mut Board) -> Result<Move, EngineError> {
        self.decide(board).map(|decision| decision.mv)
    }

    /// Like [`Self::find_move`], but also reports how the move was found.
    pub fn decide(&mut self, board: &mut Board) -> Result<Decision, EngineError> {
        if board.is_full() {
            return Err(EngineError::BoardFull);
        }

        // Optimization: a win or a forced block needs no search
        if let Some(immediate) = scanner::scan(board, self.mark) {
            if immediate.rating != 0 {
                let source = match immediate.urgency {
                    Urgency::Win => Source::Win,
                    Urgency::Block => Source::Block,
                };
                return Ok(self.report(Decision {
                    mv: immediate.mv,
                    rating: immediate.rating,
                    source,
                }));
            }
        }

        let best = minmax::search(board, self.mark, self.search_depth);
        let searched = match best.mv {
            Some(mv) if best.rating != 0 && board.is_empty(mv) => Some(mv),
            Some(mv) if best.rating != 0 => {
                warn!("search chose taken cell {mv}, falling back to a random cell");
                None
            }
            _ => None,
        };

        let decision = match searched {
            Some(mv) => Decision {
                mv,
                rating: best.rating,
                source: Source::Search,
            },
            None => Decision {
                mv: random_empty_cell(board, &mut self.rng)?,
                rating: 0,
                source: Source::Random,
            },
        };
        Ok(self.report(decision))
    }

    fn report(&self, decision: Decision) -> Decision {
        debug!(
            "engine {} plays {} ({:?}, rating {})",
            self.mark, decision.mv, decision.source, decision.rating
        );
        decision
    }
}
