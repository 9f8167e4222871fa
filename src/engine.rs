//! Engine state management.
//!
//! Holds the game sessions, engine options, and the dice source, and
//! answers protocol commands by writing response lines.

use std::collections::HashMap;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Action, PlayerData, PlayerId};
use crate::protocol::view::GameView;
use crate::session::{SessionError, SessionStore};

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub sessions: SessionStore,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with no games and an entropy-seeded dice source.
    pub fn new() -> Self {
        Engine {
            sessions: SessionStore::new(),
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates an engine whose dice follow a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Engine {
            rng: SmallRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    /// Sets an engine option. `Seed` reseeds the dice source.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name.eq_ignore_ascii_case("seed") {
            match value.as_deref().map(str::parse::<u64>) {
                Some(Ok(seed)) => self.rng = SmallRng::seed_from_u64(seed),
                _ => log::warn!("Seed option needs an unsigned integer value"),
            }
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Handles the handshake: writes id, options, protocol_version, and hellook.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name deepdive")?;
        writeln!(out, "id author deepdive")?;
        writeln!(out, "option name Seed type spin default 0 min 0")?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Starts a game and shows it from the first player's seat.
    pub fn handle_newgame<W: Write>(
        &mut self,
        game_id: &str,
        roster: &[PlayerData],
        out: &mut W,
    ) -> io::Result<()> {
        let result = self
            .sessions
            .create(game_id, roster, &mut self.rng)
            .map(|state| GameView::for_player(&state, &state.players[0].id));
        write_view(result, out)
    }

    /// Applies a player's action and shows the result from their seat.
    pub fn handle_play<W: Write>(
        &mut self,
        game_id: &str,
        player: &PlayerId,
        action: Action,
        out: &mut W,
    ) -> io::Result<()> {
        let result = self
            .sessions
            .play(game_id, player, action, &mut self.rng)
            .map(|state| GameView::for_player(&state, player));
        write_view(result, out)
    }

    /// Shows a game from a player's seat.
    pub fn handle_view<W: Write>(
        &self,
        game_id: &str,
        player: &PlayerId,
        out: &mut W,
    ) -> io::Result<()> {
        let result = self.sessions.get(game_id).and_then(|state| {
            state
                .player(player)
                .map(|_| GameView::for_player(&state, player))
                .ok_or_else(|| SessionError::UnknownPlayer(player.clone()))
        });
        write_view(result, out)
    }

    /// Drops a game.
    pub fn handle_endgame<W: Write>(&mut self, game_id: &str, out: &mut W) -> io::Result<()> {
        match self.sessions.remove(game_id) {
            Ok(_) => writeln!(out, "ok")?,
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }
}

fn write_view<W: Write>(result: Result<GameView, SessionError>, out: &mut W) -> io::Result<()> {
    match result {
        Ok(view) => {
            let json = serde_json::to_string(&view).map_err(io::Error::other)?;
            writeln!(out, "state {}", json)?;
        }
        Err(e) => {
            log::warn!("{}", e);
            writeln!(out, "error {}", e)?;
        }
    }
    out.flush()
}
