//! Per-player views of the game state.
//!
//! Chip values are secret: board spaces only show their level, and
//! opponents' holdings only show levels too. A player sees the values of
//! what they themselves carry. Banked treasure and scores are public.

use serde::Serialize;

use crate::board::{
    GameState, PlayerId, Roll, Round, RoundEndSummary, SingleTreasure, Space, Submarine, Treasure,
};

/// A treasure as seen by a particular player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TreasureView {
    /// Face-down single chip.
    Hidden { level: u8 },
    /// Face-down stack, listing each chip's level.
    HiddenStack { levels: Vec<u8> },
    /// A chip whose value the viewer is allowed to see.
    Single { level: u8, value: u32 },
    /// A stack whose values the viewer is allowed to see.
    Stack { chips: Vec<SingleTreasure> },
}

impl TreasureView {
    fn hidden(treasure: &Treasure) -> Self {
        match treasure {
            Treasure::Single(t) => TreasureView::Hidden { level: t.level },
            Treasure::Stack { chips } => TreasureView::HiddenStack {
                levels: chips.chips().iter().map(|t| t.level).collect(),
            },
        }
    }

    fn revealed(treasure: &Treasure) -> Self {
        match treasure {
            Treasure::Single(t) => TreasureView::Single {
                level: t.level,
                value: t.value,
            },
            Treasure::Stack { chips } => TreasureView::Stack {
                chips: chips.chips().to_vec(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub holding_treasures: Vec<TreasureView>,
    pub discovered_treasures: Vec<SingleTreasure>,
    pub score: u32,
}

/// What one player is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub viewer: PlayerId,
    pub current_player: PlayerId,
    pub players: Vec<PlayerView>,
    pub submarine: Submarine,
    /// `None` marks an empty space.
    pub spaces: Vec<Option<TreasureView>>,
    pub round: Round,
    pub round_end_summary: Option<RoundEndSummary>,
    pub ended: bool,
    pub winners: Vec<PlayerId>,
}

impl GameView {
    /// Projects `state` for `viewer`.
    pub fn for_player(state: &GameState, viewer: &PlayerId) -> Self {
        GameView {
            viewer: viewer.clone(),
            current_player: state.current_player().id.clone(),
            players: state
                .players
                .iter()
                .map(|p| {
                    let project: fn(&Treasure) -> TreasureView = if &p.id == viewer {
                        TreasureView::revealed
                    } else {
                        TreasureView::hidden
                    };
                    PlayerView {
                        id: p.id.clone(),
                        name: p.name.clone(),
                        holding_treasures: p.holding_treasures.iter().map(project).collect(),
                        discovered_treasures: p.discovered_treasures.clone(),
                        score: p.score,
                    }
                })
                .collect(),
            submarine: state.submarine,
            spaces: state.spaces.iter().map(hide_space).collect(),
            round: state.round.clone(),
            round_end_summary: state.round_end_summary.clone(),
            ended: state.ended,
            winners: state.winners(),
        }
    }

    /// The last roll, if one is on display.
    pub fn roll(&self) -> Option<Roll> {
        self.round.roll
    }
}

fn hide_space(space: &Space) -> Option<TreasureView> {
    space.as_ref().map(TreasureView::hidden)
}
