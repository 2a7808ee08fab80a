use anyhow::{Context, Result, bail};
use tracing::info;

use tabia_board::Position;
use tabia_engine::Searcher;
use tabia_engine::search::tt::DEFAULT_TT_ENTRIES;

/// Search depth used when none is given on the command line.
const DEFAULT_DEPTH: u8 = 4;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut depth = DEFAULT_DEPTH;
    let mut fen_parts: Vec<String> = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--depth" => {
                let value = args.next().context("--depth requires a value")?;
                depth = value
                    .parse()
                    .with_context(|| format!("invalid depth: \"{value}\""))?;
            }
            _ => fen_parts.push(arg),
        }
    }

    let mut position = if fen_parts.is_empty() || fen_parts[0] == "startpos" {
        Position::startpos()
    } else {
        Position::from_fen(&fen_parts.join(" "))?
    };

    info!(depth, "tabia starting");

    let mut searcher = Searcher::new(DEFAULT_TT_ENTRIES);
    match searcher.choose_move(&mut position, depth) {
        Some(mv) => println!("{mv}"),
        None => bail!("no legal moves: the game is already over"),
    }

    Ok(())
}
