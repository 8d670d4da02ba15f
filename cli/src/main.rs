use anyhow::Result;
use clap::Parser;
use gridsweep_core::{CellCount, Coord, Difficulty, Game, Snapshot};
use std::path::PathBuf;

mod replay;
mod settings;

use settings::{LevelSettings, Settings};

/// Plays a scripted Minesweeper game and prints the final board as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    /// TOML settings file, command-line values take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of columns
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
    width: Option<Coord>,

    /// Number of rows
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
    height: Option<Coord>,

    /// Exact mine count, 10% to 30% of the cells, overrides the difficulty
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Mine density preset: easy, medium or hard
    #[arg(short, long, value_parser = settings::parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Moves to play, e.g. "r 4 4; f 0 1; r 2 3"
    #[arg(long, value_name = "SCRIPT", default_value = "")]
    moves: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let settings = settings.with_overrides(
        LevelSettings {
            width: args.width,
            height: args.height,
            mines: args.mines,
            difficulty: args.difficulty,
        },
        args.seed,
    );
    let level = settings.resolve_level()?;
    let moves = replay::parse_script(&args.moves)?;

    let builder = Game::builder(level);
    let builder = match settings.seed {
        Some(seed) => builder.seed(seed),
        None => builder,
    };
    let mut game = builder.build_with((), replay::LogEvents);
    log::debug!(
        "playing {} moves on {}x{} with {} mines",
        moves.len(),
        level.width,
        level.height,
        level.mines
    );

    replay::play(&mut game, &moves);

    let snapshot = Snapshot::from_game(&game);
    log::debug!("final board:\n{snapshot}");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
