//! Turn sequencing.
//!
//! Routes an action to the handler for the current turn phase and then
//! runs round-end processing. This is the single transition entry point.

use rand::Rng;

use crate::board::{Action, GameState, TurnPhase};

use super::actions::{handle_end, handle_start};
use super::round_end::process_round_end;

/// Computes the state that follows `action`, leaving `state` untouched.
///
/// Actions that do not fit the current phase are ignored, so an unchanged
/// result means the action was rejected. Once the game has ended every
/// action is ignored.
pub fn game_loop<R: Rng + ?Sized>(action: Action, state: &GameState, rng: &mut R) -> GameState {
    let mut next = state.clone();
    advance_state(action, &mut next, rng);
    next
}

/// Applies `action` to `state` in place.
pub fn advance_state<R: Rng + ?Sized>(action: Action, state: &mut GameState, rng: &mut R) {
    if state.ended {
        return;
    }

    let current_returned = state.current_position().is_some_and(|p| p.is_returned());
    if current_returned && !state.round.all_returned() {
        log::error!(
            "{:?} received for {} who has already returned in round {}",
            action,
            state.current_player().id,
            state.round.number
        );
    }

    match (state.round.phase, action.is_start_action()) {
        (TurnPhase::Start, true) => handle_start(action, state, rng),
        (TurnPhase::End, false) => handle_end(action, state),
        _ => log::debug!("ignoring {:?} during {:?} phase", action, state.round.phase),
    }

    process_round_end(state);
}
