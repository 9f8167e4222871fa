//! Turn rotation.
//!
//! Passes the turn clockwise around the fixed roster, skipping players who
//! are already back at the submarine.

use crate::board::{GameState, Player, Round};

/// Returns the roster index of the next player to act after `current`.
///
/// Tries each seat in clockwise order, ending with `current` itself. If
/// every player has returned, `current` is returned unchanged.
pub fn next_player(current: usize, players: &[Player], round: &Round) -> usize {
    let n = players.len();
    (1..=n)
        .map(|step| (current + step) % n)
        .find(|&idx| {
            !round
                .position_of(&players[idx].id)
                .is_some_and(|p| p.is_returned())
        })
        .unwrap_or(current)
}

/// Advances `state.current` to the next player.
pub fn rotate(state: &mut GameState) {
    state.current = next_player(state.current, &state.players, &state.round);
}
