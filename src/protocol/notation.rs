//! Text notation for actions.
//!
//! Used by the command protocol and by self-play records. The forms are
//! `roll`, `return`, `pickup`, `pass` (or `no-action`), and `replace <n>`,
//! where `n` indexes the player's holding from the most recent pickup.

use thiserror::Error;

use crate::board::Action;

/// Errors that can occur when parsing action notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("replace needs a holding index")]
    MissingIndex,

    #[error("invalid holding index '{0}'")]
    InvalidIndex(String),

    #[error("unexpected token '{0}'")]
    TrailingInput(String),
}

/// Parses one action, e.g. `roll` or `replace 1`.
pub fn parse_action(s: &str) -> Result<Action, NotationError> {
    let mut tokens = s.split_whitespace();
    let verb = tokens.next().ok_or(NotationError::EmptyInput)?;

    let action = match verb.to_ascii_lowercase().as_str() {
        "roll" => Action::Roll,
        "return" => Action::Return,
        "pickup" => Action::Pickup,
        "pass" | "no-action" => Action::NoAction,
        "replace" => {
            let raw = tokens.next().ok_or(NotationError::MissingIndex)?;
            let holding_index = raw
                .parse::<usize>()
                .map_err(|_| NotationError::InvalidIndex(raw.to_string()))?;
            Action::Replace { holding_index }
        }
        _ => return Err(NotationError::UnknownAction(verb.to_string())),
    };

    match tokens.next() {
        Some(extra) => Err(NotationError::TrailingInput(extra.to_string())),
        None => Ok(action),
    }
}

/// Formats an action in canonical notation.
pub fn format_action(action: &Action) -> String {
    match action {
        Action::Roll => "roll".to_string(),
        Action::Return => "return".to_string(),
        Action::Pickup => "pickup".to_string(),
        Action::NoAction => "pass".to_string(),
        Action::Replace { holding_index } => format!("replace {}", holding_index),
    }
}

/// Formats a sequence of actions separated by `" ; "`.
pub fn format_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(format_action)
        .collect::<Vec<_>>()
        .join(" ; ")
}
