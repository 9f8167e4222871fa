//! Board representation and game-state types.
//!
//! Contains the core data structures for treasures, players, positions,
//! actions, and the overall game state.

pub mod action;
pub mod player;
pub mod position;
pub mod state;
pub mod treasure;

pub use action::Action;
pub use player::{Player, PlayerData, PlayerId};
pub use position::{furthest_first, is_occupied, Position, START_INDEX, START_POSITION};
pub use state::{
    GameState, PlayerRoundSummary, Roll, Round, RoundEndSummary, Seat, SetupError, Submarine,
    TurnPhase, DIE_FACES, STARTING_OXYGEN, TOTAL_ROUNDS,
};
pub use treasure::{
    expand, full_treasure_set, stack_chips, SingleTreasure, Space, Treasure, TreasureStack,
    STACK_CAPACITY,
};
