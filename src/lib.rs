//! Deepdive engine library.
//!
//! Exposes the board representation, the rules resolver, game sessions,
//! self-play, and protocol modules for use by integration tests and the
//! binary entry points.

pub mod board;
pub mod engine;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
pub mod session;

pub use board::{Action, GameState};
pub use resolve::game_loop;
