//! Per-phase action handlers.
//!
//! Start-of-turn actions resolve a roll; end-of-turn actions touch the
//! board and pass the turn. Handlers mutate the state in place and never
//! fail: an action that cannot apply leaves the board and piles untouched.

use rand::Rng;

use crate::board::{Action, GameState, Position, Treasure, TurnPhase, START_INDEX};

use super::movement::{resolve_roll, Movement};
use super::turn::rotate;

/// Handles `Roll` or `Return` during the start phase.
pub fn handle_start<R: Rng + ?Sized>(action: Action, state: &mut GameState, rng: &mut R) {
    let Some(Position::Active { space, returning }) = state.current_position() else {
        return;
    };
    // Turning back is only possible after leaving the submarine.
    let returning = returning || (action == Action::Return && space != START_INDEX);
    let movement = resolve_roll(space, returning, state, rng);
    apply_movement(state, movement);
}

/// Records a resolved move: drains oxygen, moves the player, and hands the
/// turn on straight away if they made it back.
pub fn apply_movement(state: &mut GameState, movement: Movement) {
    let drain = state.total_holding() as i32;
    state.submarine.oxygen = (state.submarine.oxygen - drain).max(0);

    let id = state.current_player().id.clone();
    state.round.set_position(&id, movement.position);
    state.round.roll = Some(movement.roll);

    log::debug!(
        "{} rolled {}+{}-{} to {:?}, oxygen {}",
        id,
        movement.roll.die1,
        movement.roll.die2,
        movement.roll.penalty,
        movement.position,
        state.submarine.oxygen
    );

    if movement.position.is_returned() {
        rotate(state);
        state.round.phase = TurnPhase::Start;
    } else {
        state.round.phase = TurnPhase::End;
    }
}

/// Handles `Pickup`, `Replace`, or `NoAction` during the end phase. The
/// turn always passes afterwards.
pub fn handle_end(action: Action, state: &mut GameState) {
    if let Some(Position::Active { space, .. }) = state.current_position() {
        match action {
            Action::Pickup => {
                pickup(state, space);
            }
            Action::Replace { holding_index } => {
                replace(state, space, holding_index);
            }
            Action::NoAction | Action::Roll | Action::Return => {}
        }
    }
    pass_turn(state);
}

/// Hands the turn to the next player and clears the stored roll.
pub fn pass_turn(state: &mut GameState) {
    rotate(state);
    state.round.phase = TurnPhase::Start;
    state.round.roll = None;
}

/// Moves a single treasure from `space` to the front of the current
/// player's holding. Returns false if there was nothing to take.
pub fn pickup(state: &mut GameState, space: i32) -> bool {
    let Some(slot) = usize::try_from(space).ok().and_then(|i| state.spaces.get_mut(i)) else {
        return false;
    };
    if !matches!(slot, Some(Treasure::Single(_))) {
        return false;
    }
    let Some(treasure) = slot.take() else {
        return false;
    };
    state.current_player_mut().holding_treasures.insert(0, treasure);
    true
}

/// Puts the held treasure at `holding_index` down on an empty `space`.
/// Returns false if the index is out of range or the space is not empty.
pub fn replace(state: &mut GameState, space: i32, holding_index: usize) -> bool {
    let Some(idx) = usize::try_from(space).ok().filter(|&i| i < state.spaces.len()) else {
        return false;
    };
    if state.spaces[idx].is_some() || holding_index >= state.current_player().holding_count() {
        return false;
    }
    let treasure = state.current_player_mut().holding_treasures.remove(holding_index);
    state.spaces[idx] = Some(treasure);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PlayerData, PlayerId, Roll, SingleTreasure, TreasureStack};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn game() -> GameState {
        let mut rng = SmallRng::seed_from_u64(21);
        let roster = [PlayerData::new("bob", "Bob"), PlayerData::new("sally", "Sally")];
        GameState::new_game(&roster, &mut rng).unwrap()
    }

    fn place(state: &mut GameState, id: &str, space: i32, returning: bool) {
        state
            .round
            .set_position(&PlayerId::from(id), Position::Active { space, returning });
    }

    fn chip(value: u32) -> Treasure {
        Treasure::Single(SingleTreasure::new(value, 1))
    }

    fn movement(position: Position) -> Movement {
        Movement {
            position,
            roll: Roll {
                die1: 1,
                die2: 2,
                penalty: 0,
                total: 3,
            },
        }
    }

    #[test]
    fn roll_moves_forward_and_ends_phase() {
        let mut state = game();
        let mut rng = SmallRng::seed_from_u64(1);
        handle_start(Action::Roll, &mut state, &mut rng);
        let roll = state.round.roll.unwrap();
        assert_eq!(state.round.phase, TurnPhase::End);
        assert_eq!(
            state.round.position_of(&PlayerId::from("bob")),
            Some(Position::Active {
                space: roll.total as i32 - 1,
                returning: false,
            })
        );
        assert_eq!(state.current, 0);
    }

    #[test]
    fn return_at_submarine_goes_forward() {
        let mut state = game();
        let mut rng = SmallRng::seed_from_u64(1);
        handle_start(Action::Return, &mut state, &mut rng);
        match state.round.position_of(&PlayerId::from("bob")) {
            Some(Position::Active { space, returning }) => {
                assert!(space >= 1);
                assert!(!returning);
            }
            other => panic!("unexpected position {:?}", other),
        }
    }

    #[test]
    fn return_turns_player_around() {
        let mut state = game();
        place(&mut state, "bob", 20, false);
        let mut rng = SmallRng::seed_from_u64(1);
        handle_start(Action::Return, &mut state, &mut rng);
        match state.round.position_of(&PlayerId::from("bob")) {
            Some(Position::Active { space, returning }) => {
                assert!(space < 20);
                assert!(returning);
            }
            other => panic!("unexpected position {:?}", other),
        }
    }

    #[test]
    fn roll_keeps_returning_direction() {
        let mut state = game();
        place(&mut state, "bob", 20, true);
        let mut rng = SmallRng::seed_from_u64(4);
        handle_start(Action::Roll, &mut state, &mut rng);
        assert!(matches!(
            state.round.position_of(&PlayerId::from("bob")),
            Some(Position::Active { space, returning: true }) if space < 20
        ));
    }

    #[test]
    fn roll_drains_oxygen_by_everything_held() {
        let mut state = game();
        state.players[0].holding_treasures = vec![chip(1)];
        state.players[1].holding_treasures = vec![chip(2), chip(3)];
        apply_movement(&mut state, movement(Position::Active { space: 4, returning: false }));
        assert_eq!(state.submarine.oxygen, 22);
    }

    #[test]
    fn oxygen_never_goes_negative() {
        let mut state = game();
        state.submarine.oxygen = 1;
        state.players[1].holding_treasures = vec![chip(2), chip(3)];
        apply_movement(&mut state, movement(Position::Active { space: 4, returning: false }));
        assert_eq!(state.submarine.oxygen, 0);
    }

    #[test]
    fn returning_home_passes_the_turn_immediately() {
        let mut state = game();
        apply_movement(&mut state, movement(Position::Returned { return_index: 0 }));
        assert_eq!(state.current, 1);
        assert_eq!(state.round.phase, TurnPhase::Start);
        assert!(state.round.roll.is_some());
    }

    #[test]
    fn pickup_takes_single_treasure() {
        let mut state = game();
        place(&mut state, "bob", 3, false);
        state.round.phase = TurnPhase::End;
        state.players[0].holding_treasures = vec![chip(9)];
        let on_board = state.spaces[3].clone().unwrap();
        handle_end(Action::Pickup, &mut state);
        assert!(state.spaces[3].is_none());
        assert_eq!(state.players[0].holding_treasures, vec![on_board, chip(9)]);
        assert_eq!(state.current, 1);
        assert_eq!(state.round.phase, TurnPhase::Start);
        assert!(state.round.roll.is_none());
    }

    #[test]
    fn pickup_ignores_empty_and_stacked_spaces() {
        let mut state = game();
        state.spaces[3] = None;
        assert!(!pickup(&mut state, 3));
        let stack = TreasureStack::new(vec![SingleTreasure::new(1, 1)]).unwrap();
        state.spaces[4] = Some(stack.into());
        assert!(!pickup(&mut state, 4));
        assert!(!pickup(&mut state, START_INDEX));
        assert!(!pickup(&mut state, 500));
        assert!(state.players[0].holding_treasures.is_empty());
    }

    #[test]
    fn replace_puts_treasure_on_empty_space() {
        let mut state = game();
        place(&mut state, "bob", 5, true);
        state.spaces[5] = None;
        state.players[0].holding_treasures = vec![chip(1), chip(2)];
        handle_end(Action::Replace { holding_index: 1 }, &mut state);
        assert_eq!(state.spaces[5], Some(chip(2)));
        assert_eq!(state.players[0].holding_treasures, vec![chip(1)]);
        assert_eq!(state.current, 1);
    }

    #[test]
    fn replace_requires_empty_space_and_valid_index() {
        let mut state = game();
        state.players[0].holding_treasures = vec![chip(1)];
        assert!(!replace(&mut state, 5, 0));
        state.spaces[5] = None;
        assert!(!replace(&mut state, 5, 1));
        assert!(!replace(&mut state, START_INDEX, 0));
        assert_eq!(state.players[0].holding_treasures, vec![chip(1)]);
        assert!(replace(&mut state, 5, 0));
    }

    #[test]
    fn no_action_only_passes_the_turn() {
        let mut state = game();
        place(&mut state, "bob", 5, false);
        state.round.phase = TurnPhase::End;
        let spaces = state.spaces.clone();
        handle_end(Action::NoAction, &mut state);
        assert_eq!(state.spaces, spaces);
        assert_eq!(state.current, 1);
        assert_eq!(state.round.phase, TurnPhase::Start);
    }
}
