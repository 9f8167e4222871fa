//! Self-play game generation CLI.
//!
//! Plays complete games with the built-in policy and writes one JSON record
//! per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use deepdive::selfplay::{self, SelfPlayConfig};

#[derive(Debug, Parser)]
#[command(name = "selfplay", about = "Play simulated treasure-diving games")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Divers per game
    #[arg(long, default_value_t = 4)]
    players: usize,
    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,
    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Turn back once holding this many treasures
    #[arg(long, default_value_t = 3)]
    return_threshold: usize,
    /// Turn back once oxygen falls to this level
    #[arg(long, default_value_t = 10)]
    low_oxygen: i32,
    /// Chance of picking up a treasure, between 0 and 1
    #[arg(long, default_value_t = 0.6)]
    pickup_probability: f64,
    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<String>,
    /// Suppress progress and summary output
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !(0.0..=1.0).contains(&args.pickup_probability) {
        log::error!("--pickup-probability must be between 0 and 1");
        return ExitCode::FAILURE;
    }

    let config = SelfPlayConfig {
        num_games: args.games,
        players: args.players,
        threads: args.threads,
        seed: args.seed,
        return_threshold: args.return_threshold,
        low_oxygen: args.low_oxygen,
        pickup_probability: args.pickup_probability,
        quiet: args.quiet,
        ..SelfPlayConfig::default()
    };

    if !config.quiet {
        log::info!(
            "self-play: {} games, {} players, {} threads",
            config.num_games,
            config.players,
            config.threads
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    if !config.quiet {
        log::info!(
            "completed {} games in {:.1}s",
            games.len(),
            elapsed.as_secs_f64()
        );
        if let Err(e) = selfplay::print_summary(&games, &mut io::stderr()) {
            log::warn!("failed to write summary: {}", e);
        }
    }

    let written = match &args.output {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => selfplay::write_jsonl(&games, &mut BufWriter::new(io::stdout().lock())),
    };
    if let Err(e) = written {
        log::error!("failed to write output: {}", e);
        return ExitCode::FAILURE;
    }
    if let (Some(path), false) = (&args.output, config.quiet) {
        log::info!("wrote {} games to {}", games.len(), path);
    }
    ExitCode::SUCCESS
}
