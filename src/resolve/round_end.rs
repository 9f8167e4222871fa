//! Round-end processing.
//!
//! A round ends when the submarine runs out of oxygen or every diver is
//! back. Returned divers bank what they carry; everyone else drops their
//! haul, which sinks to the end of the track in stacks of three.

use crate::board::{
    expand, furthest_first, GameState, PlayerRoundSummary, Position, RoundEndSummary, Seat,
    SingleTreasure, Space, Submarine, Treasure, TreasureStack, TurnPhase, START_POSITION,
    STACK_CAPACITY, TOTAL_ROUNDS,
};

/// True if the round in progress is over.
pub fn is_round_end(state: &GameState) -> bool {
    state.submarine.oxygen <= 0 || state.round.all_returned()
}

/// Runs round-end processing if the round is over; otherwise leaves the
/// state untouched. Returns whether the round ended.
pub fn process_round_end(state: &mut GameState) -> bool {
    if !is_round_end(state) {
        return false;
    }

    let finished = state.round.number;
    let by_progress = sorted_by_progress(&state.round.positions);

    // Forfeited chips are collected furthest diver first.
    let forfeited: Vec<SingleTreasure> = by_progress
        .iter()
        .filter(|seat| !seat.position.is_returned())
        .filter_map(|seat| state.player(&seat.player))
        .flat_map(|p| expand(&p.holding_treasures))
        .collect();

    state.round_end_summary = Some(summarize(state));
    settle_players(state);
    state.submarine = Submarine::default();
    state.spaces = restack_spaces(std::mem::take(&mut state.spaces), forfeited);

    state.round.number = (finished + 1).min(TOTAL_ROUNDS);
    state.ended = finished >= TOTAL_ROUNDS;
    if !state.ended {
        state.round.positions = by_progress
            .into_iter()
            .map(|seat| Seat {
                player: seat.player,
                position: START_POSITION,
            })
            .collect();
    }
    state.round.phase = TurnPhase::Start;
    state.round.roll = None;

    if state.ended {
        log::info!("game over after round {}, winners {:?}", finished, state.winners());
    } else {
        log::info!("round {} over, {} spaces left on the track", finished, state.spaces.len());
    }
    true
}

/// Position entries ordered furthest-along first.
pub fn sorted_by_progress(positions: &[Seat]) -> Vec<Seat> {
    let mut seats = positions.to_vec();
    seats.sort_by(|a, b| furthest_first(&a.position, &b.position));
    seats
}

fn summarize(state: &GameState) -> RoundEndSummary {
    RoundEndSummary {
        number: state.round.number,
        players: state
            .round
            .positions
            .iter()
            .map(|seat| PlayerRoundSummary {
                player: seat.player.clone(),
                position: seat.position,
                discovered: match (seat.position, state.player(&seat.player)) {
                    (Position::Returned { .. }, Some(p)) => expand(&p.holding_treasures),
                    _ => Vec::new(),
                },
            })
            .collect(),
    }
}

/// Banks returned players' holdings and empties everyone else's hands.
fn settle_players(state: &mut GameState) {
    let round = &state.round;
    for player in state.players.iter_mut() {
        let returned = round
            .position_of(&player.id)
            .is_some_and(|p| p.is_returned());
        let holding = std::mem::take(&mut player.holding_treasures);
        if returned {
            player.discovered_treasures.extend(expand(&holding));
            player.recompute_score();
        }
    }
}

/// Drops empty spaces and piles `forfeited` onto the end of the track.
///
/// A trailing stack is topped up before new stacks of `STACK_CAPACITY`
/// are started; a trailing single treasure stays where it is.
pub fn restack_spaces(spaces: Vec<Space>, forfeited: Vec<SingleTreasure>) -> Vec<Space> {
    let mut compacted: Vec<Treasure> = spaces.into_iter().flatten().collect();

    let mut chips = Vec::with_capacity(forfeited.len() + STACK_CAPACITY);
    if matches!(compacted.last(), Some(Treasure::Stack { .. })) {
        if let Some(last) = compacted.pop() {
            chips.extend(last.into_chips());
        }
    }
    chips.extend(forfeited);

    compacted.extend(
        chips
            .chunks(STACK_CAPACITY)
            .filter_map(|chunk| TreasureStack::new(chunk.to_vec()))
            .map(Treasure::from),
    );
    compacted.into_iter().map(Some).collect()
}
