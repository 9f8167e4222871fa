//! Line protocol handling.
//!
//! Command parsing for the engine main loop, the text notation for actions,
//! and the per-player state projection sent back to clients.

pub mod notation;
pub mod parser;
pub mod view;

pub use notation::{format_action, format_actions, parse_action, NotationError};
pub use parser::{parse_command, Command};
pub use view::{GameView, PlayerView, TreasureView};
