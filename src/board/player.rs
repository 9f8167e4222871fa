//! Players and their treasure piles.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::treasure::{SingleTreasure, Treasure};

/// Opaque player identifier assigned by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

/// Identity of a seat at the table, as handed over by matchmaking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerData {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerData {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        PlayerData {
            id: PlayerId::new(id),
            name: name.into(),
        }
    }
}

/// A diver. `score` always equals the sum of `discovered_treasures`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Carried treasure, most recently picked up first.
    pub holding_treasures: Vec<Treasure>,
    pub discovered_treasures: Vec<SingleTreasure>,
    pub score: u32,
}

impl Player {
    /// Creates a player with empty piles and zero score.
    pub fn new(data: &PlayerData) -> Self {
        Player {
            id: data.id.clone(),
            name: data.name.clone(),
            holding_treasures: Vec::new(),
            discovered_treasures: Vec::new(),
            score: 0,
        }
    }

    /// Number of treasures carried; this is the movement penalty.
    pub fn holding_count(&self) -> usize {
        self.holding_treasures.len()
    }

    /// Recomputes `score` from the discovered pile.
    pub fn recompute_score(&mut self) {
        self.score = self.discovered_treasures.iter().map(|t| t.value).sum();
    }
}
