//! Player positions on the track and their progress ordering.
//!
//! Space indices count distance from the submarine; `START_INDEX` is the
//! submarine itself. A player who makes it back is `Returned` for the rest
//! of the round.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// The submarine's index, one step before the first space.
pub const START_INDEX: i32 = -1;

/// Where every player begins a round.
pub const START_POSITION: Position = Position::Active {
    space: START_INDEX,
    returning: false,
};

/// A player's place in the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Position {
    /// On the track (or still at the submarine when `space == START_INDEX`).
    Active { space: i32, returning: bool },
    /// Back at the submarine. `return_index` is arrival order, 0 first.
    #[serde(rename_all = "camelCase")]
    Returned { return_index: u32 },
}

impl Position {
    pub const fn is_returned(&self) -> bool {
        matches!(self, Position::Returned { .. })
    }

    /// The occupied space, if the player is still out on the track.
    pub const fn space(&self) -> Option<i32> {
        match self {
            Position::Active { space, .. } => Some(*space),
            Position::Returned { .. } => None,
        }
    }
}

/// Compares positions so that the player furthest along sorts first.
///
/// Active positions come before returned ones and are ranked by distance
/// from the submarine, furthest first. Returned positions are ranked by
/// arrival, earliest first.
pub fn furthest_first(a: &Position, b: &Position) -> Ordering {
    match (a, b) {
        (Position::Active { space: sa, .. }, Position::Active { space: sb, .. }) => sb.cmp(sa),
        (Position::Active { .. }, Position::Returned { .. }) => Ordering::Less,
        (Position::Returned { .. }, Position::Active { .. }) => Ordering::Greater,
        (
            Position::Returned { return_index: ra },
            Position::Returned { return_index: rb },
        ) => ra.cmp(rb),
    }
}

/// True if any active position sits on `space`.
pub fn is_occupied<'a, I>(space: i32, positions: I) -> bool
where
    I: IntoIterator<Item = &'a Position>,
{
    positions.into_iter().any(|p| p.space() == Some(space))
}
