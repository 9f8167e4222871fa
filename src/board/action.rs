//! Player actions.
//!
//! `Roll` and `Return` are offered at the start of a turn; `Pickup`,
//! `Replace`, and `NoAction` after the dice have been resolved.

use serde::{Deserialize, Serialize};

/// An action submitted by the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Action {
    /// Roll and keep moving in the current direction.
    Roll,
    /// Turn back towards the submarine, then roll.
    Return,
    /// Take the single treasure on the current space.
    Pickup,
    /// Put a carried treasure down on the current (empty) space.
    #[serde(rename_all = "camelCase")]
    Replace { holding_index: usize },
    /// End the turn without touching the board.
    NoAction,
}

impl Action {
    /// True for actions that resolve a dice roll.
    pub const fn is_start_action(&self) -> bool {
        matches!(self, Action::Roll | Action::Return)
    }

    /// True for actions taken after the roll has been resolved.
    pub const fn is_end_action(&self) -> bool {
        !self.is_start_action()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_actions_partition() {
        assert!(Action::Roll.is_start_action());
        assert!(Action::Return.is_start_action());
        assert!(Action::Pickup.is_end_action());
        assert!(Action::NoAction.is_end_action());
        assert!(Action::Replace { holding_index: 0 }.is_end_action());
    }

    #[test]
    fn replace_json_carries_index() {
        let json = serde_json::to_string(&Action::Replace { holding_index: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"replace","holdingIndex":2}"#);
        let back: Action = serde_json::from_str(r#"{"kind":"noAction"}"#).unwrap();
        assert_eq!(back, Action::NoAction);
    }
}
