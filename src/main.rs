use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use zugzwang::{Engine, Position};

/// Depth-limited move picker: prints the engine's choice for a single
/// position and exits. Not a UCI engine; protocol conformance, pondering,
/// and time-based stopping are out of scope. This is only the demo harness
/// around the `Engine::get_best_move` entry point.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// FEN of the position to search. Defaults to the starting position.
    #[arg(long)]
    fen: Option<String>,

    /// Space-separated UCI moves replayed from `--fen` (or the starting
    /// position) before searching, e.g. "e2e4 e7e5".
    #[arg(long)]
    moves: Option<String>,

    /// Maximum iterative-deepening depth.
    #[arg(long, short, default_value_t = 6)]
    depth: u8,

    /// Repeatable: -v for info, -vv for debug, -vvv for trace.
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut pos = match &cli.fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("parsing --fen {fen:?}"))?,
        None => Position::starting(),
    };

    if let Some(moves) = &cli.moves {
        for uci in moves.split_whitespace() {
            pos.push_uci(uci).with_context(|| format!("replaying move {uci:?}"))?;
        }
    }

    if pos.is_checkmate() || pos.is_stalemate() {
        anyhow::bail!("position is already game-over; nothing to search");
    }

    let mut engine = Engine::new();
    let mv = engine.get_best_move(&pos, cli.depth);
    info!("search complete");
    println!("bestmove {mv}");

    Ok(())
}
