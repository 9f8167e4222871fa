//! Game state representation.
//!
//! Holds the complete snapshot of a game at a given point in time: the
//! roster, the shared oxygen supply, the track of spaces, and the state of
//! the current round.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::{Player, PlayerData, PlayerId};
use super::position::{Position, START_POSITION};
use super::treasure::{full_treasure_set, SingleTreasure, Space, Treasure, LEVEL_COUNT};

/// Oxygen in the submarine at the start of every round.
pub const STARTING_OXYGEN: i32 = 25;

/// Number of rounds in a game.
pub const TOTAL_ROUNDS: u8 = 3;

/// Faces per die; each die shows `1..=DIE_FACES`.
pub const DIE_FACES: u32 = 3;

/// Errors that can occur when setting up a new game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("a game needs at least one player")]
    EmptyRoster,

    #[error("player id '{0}' appears more than once")]
    DuplicatePlayer(PlayerId),
}

/// The shared air supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submarine {
    pub oxygen: i32,
}

impl Default for Submarine {
    fn default() -> Self {
        Submarine {
            oxygen: STARTING_OXYGEN,
        }
    }
}

/// The outcome of the last dice roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    pub die1: u32,
    pub die2: u32,
    pub penalty: u32,
    pub total: u32,
}

/// Where the current player is within their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnPhase {
    /// Waiting for a roll or return.
    Start,
    /// Roll resolved; waiting for pickup, replace, or no action.
    End,
}

/// A player's position entry for the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub player: PlayerId,
    pub position: Position,
}

/// State of the round in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub phase: TurnPhase,
    /// 1-based, never above `TOTAL_ROUNDS`.
    pub number: u8,
    /// Exactly one entry per player.
    pub positions: Vec<Seat>,
    pub roll: Option<Roll>,
}

impl Round {
    /// Looks up a player's position.
    pub fn position_of(&self, player: &PlayerId) -> Option<Position> {
        self.positions
            .iter()
            .find(|s| &s.player == player)
            .map(|s| s.position)
    }

    /// Overwrites a player's position. Returns false for an unknown player.
    pub fn set_position(&mut self, player: &PlayerId, position: Position) -> bool {
        match self.positions.iter_mut().find(|s| &s.player == player) {
            Some(seat) => {
                seat.position = position;
                true
            }
            None => false,
        }
    }

    pub fn all_returned(&self) -> bool {
        self.positions.iter().all(|s| s.position.is_returned())
    }

    pub fn returned_count(&self) -> usize {
        self.positions
            .iter()
            .filter(|s| s.position.is_returned())
            .count()
    }

    /// Iterates over every recorded position.
    pub fn iter_positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter().map(|s| &s.position)
    }
}

/// One player's line in the round-end report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoundSummary {
    pub player: PlayerId,
    pub position: Position,
    /// Chips carried home this round; empty for players who did not return.
    pub discovered: Vec<SingleTreasure>,
}

/// Read-only report of the most recently finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEndSummary {
    pub number: u8,
    pub players: Vec<PlayerRoundSummary>,
}

/// Complete game state.
///
/// The roster order is fixed for the whole game; `current` indexes the
/// player whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub players: Vec<Player>,
    pub current: usize,
    pub submarine: Submarine,
    pub spaces: Vec<Space>,
    pub round: Round,
    pub round_end_summary: Option<RoundEndSummary>,
    pub ended: bool,
}

impl GameState {
    /// Sets up a fresh game: full shuffled board, empty piles, everyone at
    /// the submarine, round 1.
    pub fn new_game<R: Rng + ?Sized>(
        roster: &[PlayerData],
        rng: &mut R,
    ) -> Result<Self, SetupError> {
        if roster.is_empty() {
            return Err(SetupError::EmptyRoster);
        }
        let mut seen = HashSet::new();
        for data in roster {
            if !seen.insert(&data.id) {
                return Err(SetupError::DuplicatePlayer(data.id.clone()));
            }
        }

        Ok(GameState {
            players: roster.iter().map(Player::new).collect(),
            current: 0,
            submarine: Submarine::default(),
            spaces: shuffled_board(rng),
            round: Round {
                phase: TurnPhase::Start,
                number: 1,
                positions: roster
                    .iter()
                    .map(|d| Seat {
                        player: d.id.clone(),
                        position: START_POSITION,
                    })
                    .collect(),
                roll: None,
            },
            round_end_summary: None,
            ended: false,
        })
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.current]
    }

    /// The current player's position. Every roster player has an entry.
    pub fn current_position(&self) -> Option<Position> {
        self.round.position_of(&self.current_player().id)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Total treasures carried across the table; this is the oxygen drain per roll.
    pub fn total_holding(&self) -> usize {
        self.players.iter().map(Player::holding_count).sum()
    }

    /// Every chip in the game, wherever it currently is.
    pub fn all_chips(&self) -> Vec<SingleTreasure> {
        let board = self.spaces.iter().flatten().flat_map(|t| t.chips().iter().copied());
        let held = self
            .players
            .iter()
            .flat_map(|p| p.holding_treasures.iter())
            .flat_map(|t| t.chips().iter().copied());
        let found = self
            .players
            .iter()
            .flat_map(|p| p.discovered_treasures.iter().copied());
        board.chain(held).chain(found).collect()
    }

    /// Ids of the top scorers once the game has ended; ties share the win.
    pub fn winners(&self) -> Vec<PlayerId> {
        if !self.ended {
            return Vec::new();
        }
        let best = self.players.iter().map(|p| p.score).max().unwrap_or(0);
        self.players
            .iter()
            .filter(|p| p.score == best)
            .map(|p| p.id.clone())
            .collect()
    }
}

/// Lays out all chips, shuffled within each level, shallowest level first.
fn shuffled_board<R: Rng + ?Sized>(rng: &mut R) -> Vec<Space> {
    let chips = full_treasure_set();
    let mut spaces = Vec::with_capacity(chips.len());
    for level in 1..=LEVEL_COUNT {
        let mut tier: Vec<SingleTreasure> = chips
            .iter()
            .copied()
            .filter(|t| t.level == level)
            .collect();
        tier.shuffle(rng);
        spaces.extend(tier.into_iter().map(|t| Some(Treasure::Single(t))));
    }
    spaces
}
