//! Dice movement resolution.
//!
//! Turns a roll into a destination space. Occupied spaces are skipped in
//! the direction of travel so that no two divers ever share a space; moving
//! out past the last free space stops on it.

use rand::Rng;

use crate::board::{is_occupied, GameState, Position, Roll, DIE_FACES, START_INDEX};

/// Where a roll took the current player, and the roll itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub position: Position,
    pub roll: Roll,
}

/// Rolls the two dice.
pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R) -> (u32, u32) {
    (rng.gen_range(1..=DIE_FACES), rng.gen_range(1..=DIE_FACES))
}

/// Rolls the dice and resolves the current player's move from `space`.
pub fn resolve_roll<R: Rng + ?Sized>(
    space: i32,
    returning: bool,
    state: &GameState,
    rng: &mut R,
) -> Movement {
    resolve_with_dice(space, returning, state, roll_dice(rng))
}

/// Resolves the current player's move for a known pair of dice.
pub fn resolve_with_dice(
    space: i32,
    returning: bool,
    state: &GameState,
    (die1, die2): (u32, u32),
) -> Movement {
    let penalty = state.current_player().holding_count() as u32;
    let total = (die1 + die2).saturating_sub(penalty);
    let step = total as i32;
    let target = if returning {
        (space - step).max(START_INDEX)
    } else {
        (space + step).max(START_INDEX)
    };

    let dest = next_space(space, target, returning, state);
    let position = if returning && dest <= START_INDEX {
        Position::Returned {
            return_index: state.round.returned_count() as u32,
        }
    } else {
        Position::Active {
            space: dest,
            returning,
        }
    };

    Movement {
        position,
        roll: Roll {
            die1,
            die2,
            penalty,
            total,
        },
    }
}

fn next_space(current: i32, target: i32, returning: bool, state: &GameState) -> i32 {
    if current == target {
        return current;
    }
    if returning {
        next_backward_space(target, state)
    } else {
        let max_space = max_available_space(current, state);
        next_forward_space(target, max_space, state)
    }
}

/// The deepest space nobody is standing on, or `current` if every space is taken.
pub fn max_available_space(current: i32, state: &GameState) -> i32 {
    (0..state.spaces.len() as i32)
        .rev()
        .find(|&s| !is_occupied(s, state.round.iter_positions()))
        .unwrap_or(current)
}

fn next_forward_space(mut target: i32, max_space: i32, state: &GameState) -> i32 {
    loop {
        if target > max_space {
            return max_space;
        }
        if !is_occupied(target, state.round.iter_positions()) {
            return target;
        }
        target += 1;
    }
}

fn next_backward_space(mut target: i32, state: &GameState) -> i32 {
    loop {
        if target <= START_INDEX {
            return START_INDEX;
        }
        if !is_occupied(target, state.round.iter_positions()) {
            return target;
        }
        target -= 1;
    }
}
