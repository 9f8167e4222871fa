//! In-memory game sessions.
//!
//! One `GameState` per game id. Every operation takes the store lock for
//! its whole duration, so actions against the store are applied one at a
//! time and each transition sees the result of the previous one.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::Rng;
use thiserror::Error;

use crate::board::{Action, GameState, PlayerData, PlayerId, SetupError};
use crate::resolve::game_loop;

/// Errors returned by session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no game with id '{0}'")]
    UnknownGame(String),

    #[error("a game with id '{0}' already exists")]
    DuplicateGame(String),

    #[error("it is {current}'s turn, not {player}'s")]
    NotYourTurn { player: PlayerId, current: PlayerId },

    #[error("player '{0}' is not in this game")]
    UnknownPlayer(PlayerId),

    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Game states keyed by game id.
#[derive(Debug, Default)]
pub struct SessionStore {
    games: Mutex<HashMap<String, GameState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, GameState>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a new game under `game_id`.
    pub fn create<R: Rng + ?Sized>(
        &self,
        game_id: &str,
        roster: &[PlayerData],
        rng: &mut R,
    ) -> Result<GameState, SessionError> {
        let mut games = self.lock();
        if games.contains_key(game_id) {
            return Err(SessionError::DuplicateGame(game_id.to_string()));
        }
        let state = GameState::new_game(roster, rng)?;
        games.insert(game_id.to_string(), state.clone());
        log::info!("started game {} with {} players", game_id, roster.len());
        Ok(state)
    }

    /// Applies `action` on behalf of `player`, who must be the current player.
    pub fn play<R: Rng + ?Sized>(
        &self,
        game_id: &str,
        player: &PlayerId,
        action: Action,
        rng: &mut R,
    ) -> Result<GameState, SessionError> {
        let mut games = self.lock();
        let state = games
            .get_mut(game_id)
            .ok_or_else(|| SessionError::UnknownGame(game_id.to_string()))?;
        if state.player(player).is_none() {
            return Err(SessionError::UnknownPlayer(player.clone()));
        }
        let current = &state.current_player().id;
        if current != player {
            return Err(SessionError::NotYourTurn {
                player: player.clone(),
                current: current.clone(),
            });
        }
        *state = game_loop(action, state, rng);
        Ok(state.clone())
    }

    /// Returns a copy of the game's current state.
    pub fn get(&self, game_id: &str) -> Result<GameState, SessionError> {
        self.lock()
            .get(game_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownGame(game_id.to_string()))
    }

    /// Removes a game, returning its final state.
    pub fn remove(&self, game_id: &str) -> Result<GameState, SessionError> {
        self.lock()
            .remove(game_id)
            .ok_or_else(|| SessionError::UnknownGame(game_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TurnPhase;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn roster() -> Vec<PlayerData> {
        vec![PlayerData::new("bob", "Bob"), PlayerData::new("sally", "Sally")]
    }

    #[test]
    fn create_and_get() {
        let store = SessionStore::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let created = store.create("g1", &roster(), &mut rng).unwrap();
        assert_eq!(store.get("g1").unwrap(), created);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("nope"), Err(SessionError::UnknownGame("nope".into())));
    }

    #[test]
    fn create_rejects_duplicates_and_empty_rosters() {
        let store = SessionStore::new();
        let mut rng = SmallRng::seed_from_u64(1);
        store.create("g1", &roster(), &mut rng).unwrap();
        assert_eq!(
            store.create("g1", &roster(), &mut rng),
            Err(SessionError::DuplicateGame("g1".into()))
        );
        assert_eq!(
            store.create("g2", &[], &mut rng),
            Err(SessionError::Setup(SetupError::EmptyRoster))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn play_applies_the_current_players_action() {
        let store = SessionStore::new();
        let mut rng = SmallRng::seed_from_u64(1);
        store.create("g1", &roster(), &mut rng).unwrap();
        let next = store.play("g1", &PlayerId::from("bob"), Action::Roll, &mut rng).unwrap();
        assert_eq!(next.round.phase, TurnPhase::End);
        assert_eq!(store.get("g1").unwrap(), next);
    }

    #[test]
    fn play_rejects_out_of_turn_and_strangers() {
        let store = SessionStore::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let created = store.create("g1", &roster(), &mut rng).unwrap();
        assert_eq!(
            store.play("g1", &PlayerId::from("sally"), Action::Roll, &mut rng),
            Err(SessionError::NotYourTurn {
                player: PlayerId::from("sally"),
                current: PlayerId::from("bob"),
            })
        );
        assert_eq!(
            store.play("g1", &PlayerId::from("eve"), Action::Roll, &mut rng),
            Err(SessionError::UnknownPlayer(PlayerId::from("eve")))
        );
        assert_eq!(
            store.play("g9", &PlayerId::from("bob"), Action::Roll, &mut rng),
            Err(SessionError::UnknownGame("g9".into()))
        );
        assert_eq!(store.get("g1").unwrap(), created);
    }

    #[test]
    fn remove_drops_the_game() {
        let store = SessionStore::new();
        let mut rng = SmallRng::seed_from_u64(1);
        store.create("g1", &roster(), &mut rng).unwrap();
        assert!(store.remove("g1").is_ok());
        assert!(store.is_empty());
        assert!(store.remove("g1").is_err());
    }
}
