#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
// --> they are ridiculous and not necessary
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from
)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use xo_minimax::selfplay::{self, SelfPlayConfig};
use xo_minimax::{Board, Engine, EngineConfig, Game, Mark, Move, Outcome};

#[derive(Parser, Debug)]
#[command(name = "xo", about = "Play tic-tac-toe on N x N boards against the computer")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play against the computer on the terminal
    Play {
        /// Board size N of the N x N board
        #[arg(long, default_value_t = 3, value_parser = board_size_parser())]
        size: usize,
        /// Mark of the computer; `X` always moves first
        #[arg(long, value_enum, default_value_t = Side::O)]
        computer: Side,
        /// Plies the computer looks ahead
        #[arg(long, default_value_t = xo_minimax::DEFAULT_SEARCH_DEPTH)]
        depth: usize,
        /// Seed of the computer's random fallback
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let the computer play against a random opponent and print the results
    Selfplay {
        /// Number of games
        #[arg(long, default_value_t = 25)]
        games: usize,
        /// Board size N of the N x N board
        #[arg(long, default_value_t = 3, value_parser = board_size_parser())]
        size: usize,
        /// Plies the computer looks ahead
        #[arg(long, default_value_t = xo_minimax::DEFAULT_SEARCH_DEPTH)]
        depth: usize,
        /// Random seed
        #[arg(long, default_value_t = 1u64)]
        seed: u64,
        /// Print every game move by move
        #[arg(long)]
        verbose: bool,
    },
}

/// Board sizes start at 1.
fn board_size_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..)
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    X,
    O,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Self::X,
            Side::O => Self::O,
        }
    }
}

fn print_board(board: &Board) {
    print!("  ");
    for col_id in (0..board.size()).map(|i| i + 1) {
        print!("{col_id} ");
    }
    println!();

    for (row_id, row) in board.to_string().lines().enumerate() {
        print!("{} ", row_id + 1);
        for symbol in row.chars() {
            print!("{symbol} ");
        }
        println!();
    }
}

/// Reads `row col` (1-indexed) until the user enters a free cell.
///
/// Returns `None` when the input ends.
fn read_move(board: &Board, input: &mut impl BufRead) -> io::Result<Option<Move>> {
    loop {
        print!("Choose your move (row col): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let numbers = line
            .split_whitespace()
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>();
        match numbers.as_deref() {
            // adapt to index
            Ok(&[row, col]) if row > 0 && col > 0 => {
                let mv = Move::new(row - 1, col - 1);
                if board.contains(mv) && board.is_empty(mv) {
                    return Ok(Some(mv));
                }
                println!("Cell {row} {col} is not free.");
            }
            _ => println!("Please enter a row and a column, e.g. `2 3`."),
        }
    }
}

fn play(size: usize, computer: Mark, config: EngineConfig) -> anyhow::Result<()> {
    let mut game = Game::new(size);
    let mut engine = Engine::with_config(computer, config);
    let mut input = io::stdin().lock();

    println!(
        "Let's play tic-tac-toe against the computer. You play {}, the computer plays {} and looks {} plies ahead.",
        engine.mark().opponent(),
        engine.mark(),
        engine.search_depth()
    );
    loop {
        println!("----------------");
        print_board(game.board());
        println!();

        let mv = if game.to_move() == computer {
            let mv = engine.find_move(game.board_mut())?;
            println!("Computer chose {} {}", mv.row + 1, mv.col + 1);
            mv
        } else {
            match read_move(game.board(), &mut input)? {
                Some(mv) => mv,
                None => return Ok(()),
            }
        };

        // the engine's move is checked by `play` like any other
        match game.play(mv)? {
            Outcome::InProgress => {}
            Outcome::Won(mark) if mark == computer => {
                println!("Computer won!");
                break;
            }
            Outcome::Won(_) => {
                println!("You won!");
                break;
            }
            Outcome::Draw => {
                println!("Gameover: draw");
                break;
            }
        }
    }

    println!("----------------");
    print_board(game.board());
    Ok(())
}

fn self_play(config: &SelfPlayConfig, verbose: bool) -> anyhow::Result<()> {
    let report = selfplay::run(config)?;

    for (index, record) in report.games.iter().enumerate() {
        let result = match record.outcome {
            Outcome::Won(mark) => format!("{mark} wins"),
            Outcome::Draw => "draw".to_string(),
            Outcome::InProgress => "unfinished".to_string(),
        };
        println!(
            "game {index:>3}: engine plays {}, {} moves, {result}",
            record.engine_mark,
            record.moves.len()
        );

        if verbose {
            let mut game = Game::new(config.board_size);
            for &mv in &record.moves {
                let mover = if game.to_move() == record.engine_mark {
                    "engine"
                } else {
                    "random"
                };
                game.play(mv)?;
                println!("  {mover} goes to {mv}");
                print_board(game.board());
            }
        }
    }

    println!(
        "engine won {}, lost {}, drew {} of {} games",
        report.engine_wins(),
        report.engine_losses(),
        report.draws(),
        report.games.len()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Play {
            size,
            computer,
            depth,
            seed,
        } => play(
            size,
            computer.into(),
            EngineConfig {
                search_depth: depth,
                seed,
            },
        ),
        Command::Selfplay {
            games,
            size,
            depth,
            seed,
            verbose,
        } => self_play(
            &SelfPlayConfig {
                games,
                board_size: size,
                search_depth: depth,
                seed,
            },
            verbose,
        ),
    }
}
