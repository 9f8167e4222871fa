//! State transitions.
//!
//! Resolves dice movement, turn rotation, per-phase actions, and round-end
//! scoring, tied together by the `game_loop` entry point.

pub mod actions;
pub mod movement;
pub mod phase;
pub mod round_end;
pub mod turn;

pub use movement::{max_available_space, resolve_roll, resolve_with_dice, roll_dice, Movement};
pub use phase::{advance_state, game_loop};
pub use round_end::{is_round_end, process_round_end, restack_spaces, sorted_by_progress};
pub use turn::{next_player, rotate};
