//! Deepdive -- a treasure-diving game engine speaking a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `env_logger` (configure with `RUST_LOG`).

use std::io::{self, BufRead};

use deepdive::engine::Engine;
use deepdive::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Hello => engine.handle_hello(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame { game_id, roster } => {
                engine.handle_newgame(&game_id, &roster, &mut out)?
            }
            Command::Play {
                game_id,
                player,
                action,
            } => engine.handle_play(&game_id, &player, action, &mut out)?,
            Command::View { game_id, player } => engine.handle_view(&game_id, &player, &mut out)?,
            Command::EndGame { game_id } => engine.handle_endgame(&game_id, &mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
