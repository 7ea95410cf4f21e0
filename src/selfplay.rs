//! Engine against a uniformly random opponent.
//!
//! Game `i` is seeded with `seed + i` and independent of all other games, so
//! games run in parallel while every search stays single-threaded.

use crate::ai_player::{Engine, EngineConfig, EngineError};
use crate::game::{BoardError, Game, GameError, Mark, Move, Outcome};
use crate::random::random_empty_cell;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

#[derive(Debug, PartialEq, Clone, Copy, Eq, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub struct SelfPlayConfig {
    pub games: usize,
    pub board_size: usize,
    pub search_depth: usize,
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            games: 25,
            board_size: 3,
            search_depth: crate::ai_player::DEFAULT_SEARCH_DEPTH,
            seed: 1,
        }
    }
}

/// One finished game.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct GameRecord {
    pub engine_mark: Mark,
    /// All moves in order; `X` made the first one.
    pub moves: Vec<Move>,
    pub outcome: Outcome,
}

impl GameRecord {
    #[must_use]
    pub fn engine_won(&self) -> bool {
        self.outcome == Outcome::Won(self.engine_mark)
    }

    #[must_use]
    pub fn engine_lost(&self) -> bool {
        self.outcome == Outcome::Won(self.engine_mark.opponent())
    }
}

#[derive(Debug, PartialEq, Clone, Eq, Default)]
pub struct SelfPlayReport {
    pub games: Vec<GameRecord>,
}

impl SelfPlayReport {
    #[must_use]
    pub fn engine_wins(&self) -> usize {
        self.games.iter().filter(|g| g.engine_won()).count()
    }

    #[must_use]
    pub fn engine_losses(&self) -> usize {
        self.games.iter().filter(|g| g.engine_lost()).count()
    }

    #[must_use]
    pub fn draws(&self) -> usize {
        self.games
            .iter()
            .filter(|g| g.outcome == Outcome::Draw)
            .count()
    }
}

/// Plays all games of `config`. Even-numbered games have the engine play `O`
/// with the random side opening, odd-numbered games have it play `X`.
///
/// Fails without playing if the board size is zero.
pub fn run(config: &SelfPlayConfig) -> Result<SelfPlayReport, SelfPlayError> {
    if config.board_size == 0 {
        return Err(GameError::from(BoardError::Empty).into());
    }

    let games = (0..config.games)
        .into_par_iter()
        .map(|index| play_game(config, index))
        .collect::<Result<Vec<_>, _>>()?;

    let report = SelfPlayReport { games };
    info!(
        "self-play on {0}x{0}, depth {1}: {2} games, engine won {3}, lost {4}, drew {5}",
        config.board_size,
        config.search_depth,
        report.games.len(),
        report.engine_wins(),
        report.engine_losses(),
        report.draws()
    );
    Ok(report)
}

fn play_game(config: &SelfPlayConfig, index: usize) -> Result<GameRecord, SelfPlayError> {
    let seed = config.seed.wrapping_add(index as u64);
    let engine_mark = if index % 2 == 0 { Mark::O } else { Mark::X };
    let mut engine = Engine::with_config(
        engine_mark,
        EngineConfig {
            search_depth: config.search_depth,
            seed: Some(seed),
        },
    );
    // opponent draws from its own stream so it does not depend on the engine
    let mut opponent_rng = StdRng::seed_from_u64(!seed);

    let mut game = Game::new(config.board_size);
    let mut moves = Vec::new();
    while game.outcome() == Outcome::InProgress {
        let mv = if game.to_move() == engine_mark {
            engine.find_move(game.board_mut())?
        } else {
            random_empty_cell(game.board(), &mut opponent_rng)?
        };
        game.play(mv)?;
        moves.push(mv);
    }

    Ok(GameRecord {
        engine_mark,
        moves,
        outcome: game.outcome(),
    })
}
