//! Reversi-Rust command line.
//!
//! ## Usage
//!
//! - `reversi-rust` - Play one demo game and print every move
//! - `reversi-rust protocol` - Start the text command loop on stdin/stdout
//! - `reversi-rust selfplay --games 100` - Pit two strategies against each other

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::Verbosity;
use log::info;

use reversi_rust::board::StoneColor;
use reversi_rust::game::{Game, play_match};
use reversi_rust::protocol::{ProtocolEngine, str_coord};
use reversi_rust::random::RandomStrategy;
use reversi_rust::strategy::Strategy;
use reversi_rust::theory::TheoryStrategy;

/// Reversi-Rust: a Reversi engine with random and heuristic players
#[derive(Parser)]
#[command(name = "reversi-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity,

    /// Seed for the random strategy
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text command loop for use with a front end
    Protocol {
        /// Strategy answering `genmove`
        #[arg(long, value_enum, default_value_t = Ai::Theory)]
        ai: Ai,
    },
    /// Play a number of games between two strategies
    Selfplay {
        #[arg(long, value_enum, default_value_t = Ai::Theory)]
        black: Ai,
        #[arg(long, value_enum, default_value_t = Ai::Random)]
        white: Ai,
        /// Number of games
        #[arg(short, long, default_value_t = 10)]
        games: usize,
    },
    /// Play one game and print it move by move
    Demo {
        #[arg(long, value_enum, default_value_t = Ai::Theory)]
        black: Ai,
        #[arg(long, value_enum, default_value_t = Ai::Random)]
        white: Ai,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Ai {
    Random,
    Theory,
}

impl Ai {
    fn build(self, seed: Option<u64>) -> Box<dyn Strategy> {
        match self {
            Ai::Random => match seed {
                Some(seed) => Box::new(RandomStrategy::with_seed(seed)),
                None => Box::new(RandomStrategy::new()),
            },
            Ai::Theory => Box::new(TheoryStrategy::new()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    match cli.command {
        Some(Commands::Protocol { ai }) => {
            let mut engine = ProtocolEngine::new(ai.build(cli.seed));
            engine
                .run(io::stdin().lock(), io::stdout())
                .context("command loop I/O failed")?;
        }
        Some(Commands::Selfplay {
            black,
            white,
            games,
        }) => run_selfplay(black, white, games, cli.seed)?,
        Some(Commands::Demo { black, white }) => run_demo(black, white, cli.seed)?,
        None => run_demo(Ai::Theory, Ai::Random, cli.seed)?,
    }
    Ok(())
}

fn run_selfplay(black: Ai, white: Ai, games: usize, seed: Option<u64>) -> Result<()> {
    let mut black_ai = black.build(seed);
    // White draws from its own stream
    let mut white_ai = white.build(seed.map(|s| s.wrapping_add(1)));

    let (mut black_wins, mut white_wins, mut draws) = (0, 0, 0);
    for n in 0..games {
        let mut game = Game::new();
        let outcome = play_match(&mut game, black_ai.as_mut(), white_ai.as_mut())
            .with_context(|| format!("game {} failed", n + 1))?;
        info!(
            "game {}: Black {} White {}",
            n + 1,
            outcome.score.black,
            outcome.score.white
        );
        match outcome.winner() {
            Some(StoneColor::Black) => black_wins += 1,
            Some(_) => white_wins += 1,
            None => draws += 1,
        }
    }

    println!(
        "{} games: Black ({}) {black_wins}, White ({}) {white_wins}, draws {draws}",
        games,
        black_ai.name(),
        white_ai.name()
    );
    Ok(())
}

fn run_demo(black: Ai, white: Ai, seed: Option<u64>) -> Result<()> {
    let mut black_ai = black.build(seed);
    let mut white_ai = white.build(seed.map(|s| s.wrapping_add(1)));
    println!(
        "Reversi-Rust: Black ({}) vs White ({})\n",
        black_ai.name(),
        white_ai.name()
    );

    let mut game = Game::new();
    println!("{}", game.board());
    while let Some(color) = game.to_move() {
        let strategy = if color == StoneColor::Black {
            black_ai.as_mut()
        } else {
            white_ai.as_mut()
        };
        let report = game.play_with(strategy)?;
        println!(
            "{color} plays {} ({} flipped, {})",
            str_coord(report.placed.x, report.placed.y),
            report.flipped.len(),
            game.stage()
        );
        if let Some(skipped) = report.skipped {
            println!("{skipped} cannot put stone, turn skipped");
        }
        println!("{}", game.board());
    }

    if let Some(outcome) = game.outcome() {
        let result = match outcome.winner() {
            Some(color) => format!("{color} wins"),
            None => "Draw".to_string(),
        };
        println!(
            "{result}: Black {} White {}",
            outcome.score.black, outcome.score.white
        );
    }
    Ok(())
}
