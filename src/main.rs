//! Gomoku self-play driver
//!
//! Pits two engine tiers against each other and prints the final board.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gomoku::{
    AIEngine, Difficulty, EngineAdvisor, EngineConfig, GameSession, GameStatus, MoveAdvisor, Stone,
};

#[derive(Parser, Debug)]
#[command(name = "gomoku", version, about = "Self-play between two Gomoku engine tiers")]
struct Args {
    /// JSON engine configuration. Command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board size (5..=25). Defaults to the config value, 15 without one.
    #[arg(long)]
    size: Option<usize>,

    /// Tier playing Black (moves first)
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    black: Difficulty,

    /// Tier playing White. Defaults to the config difficulty.
    #[arg(long, value_enum)]
    white: Option<Difficulty>,

    /// Route White's moves through an advisor backed by this tier; the
    /// session's own engine remains the fallback.
    #[arg(long, value_enum)]
    advisor: Option<Difficulty>,

    /// Stop after this many stones even if the game is undecided.
    #[arg(long)]
    max_moves: Option<usize>,

    /// Log engine decisions (debug level) unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(size) = args.size {
        config.board_size = size;
    }
    if let Some(white) = args.white {
        config.difficulty = white;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let size = config.board_size;
    let max_moves = args.max_moves.unwrap_or(size * size);

    let mut black = AIEngine::with_search(size, args.black, config.search);
    let mut advisor = args
        .advisor
        .map(|tier| EngineAdvisor::new(AIEngine::with_search(size, tier, config.search)));
    if let Some(advisor) = &advisor {
        advisor
            .check_connection()
            .with_context(|| format!("advisor {} is unavailable", advisor.name()))?;
    }

    let span = tracing::info_span!("game", size, black = %args.black, white = %config.difficulty);
    let mut session = GameSession::new(&config, span);
    info!(size, black = %args.black, white = %config.difficulty, "starting self-play");

    while session.status() == GameStatus::InProgress && session.board().stone_count() < max_moves {
        let report = match session.to_move() {
            Stone::Black => match black.select_move(session.board(), Stone::Black) {
                Some(pos) => session.play(usize::from(pos.row), usize::from(pos.col))?,
                None => break,
            },
            _ => match advisor.as_mut() {
                Some(advisor) => session.advised_move(advisor)?,
                None => session.engine_move()?,
            },
        };
        if let Some(pos) = report.pos {
            info!(stone = ?report.stone, %pos, source = ?report.source, "move");
        }
    }

    println!("{}", session.board());
    match session.status() {
        GameStatus::Won(Stone::Black) => println!("Black ({}) wins", args.black),
        GameStatus::Won(_) => println!("White ({}) wins", config.difficulty),
        GameStatus::Draw => println!("Draw"),
        GameStatus::InProgress => {
            println!("Stopped after {} moves, undecided", session.board().stone_count())
        }
    }
    Ok(())
}
