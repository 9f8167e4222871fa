//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the engine main loop can dispatch on.

use crate::board::{Action, PlayerData, PlayerId};

use super::notation::parse_action;

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a game: `newgame <gameId> <playerId>[:<name>] ...`.
    NewGame {
        game_id: String,
        roster: Vec<PlayerData>,
    },

    /// Submit an action: `play <gameId> <playerId> <action>`.
    Play {
        game_id: String,
        player: PlayerId,
        action: Action,
    },

    /// Show a game from one player's seat: `view <gameId> <playerId>`.
    View { game_id: String, player: PlayerId },

    /// Drop a finished or abandoned game: `endgame <gameId>`.
    EndGame { game_id: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens),
        "newgame" => parse_newgame(&tokens),
        "play" => parse_play(&tokens),
        "view" => parse_view(&tokens),
        "endgame" => parse_endgame(&tokens),

        other => {
            log::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        log::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                log::warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `newgame <gameId> <player>...` where each player is `id` or `id:name`.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 {
        log::warn!("malformed newgame: expected 'newgame <gameId> <playerId>[:<name>] ...'");
        return None;
    }
    let roster = tokens[2..]
        .iter()
        .map(|t| match t.split_once(':') {
            Some((id, name)) if !id.is_empty() && !name.is_empty() => {
                Some(PlayerData::new(id, name))
            }
            Some(_) => None,
            None => Some(PlayerData::new(*t, *t)),
        })
        .collect::<Option<Vec<_>>>();

    match roster {
        Some(roster) => Some(Command::NewGame {
            game_id: tokens[1].to_string(),
            roster,
        }),
        None => {
            log::warn!("malformed newgame: bad player entry in '{}'", tokens[2..].join(" "));
            None
        }
    }
}

/// Parses `play <gameId> <playerId> <action...>`.
fn parse_play(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 4 {
        log::warn!("malformed play: expected 'play <gameId> <playerId> <action>'");
        return None;
    }
    match parse_action(&tokens[3..].join(" ")) {
        Ok(action) => Some(Command::Play {
            game_id: tokens[1].to_string(),
            player: PlayerId::from(tokens[2]),
            action,
        }),
        Err(e) => {
            log::warn!("malformed play: {}", e);
            None
        }
    }
}

/// Parses `view <gameId> <playerId>`.
fn parse_view(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        log::warn!("malformed view: expected 'view <gameId> <playerId>'");
        return None;
    }
    Some(Command::View {
        game_id: tokens[1].to_string(),
        player: PlayerId::from(tokens[2]),
    })
}

/// Parses `endgame <gameId>`.
fn parse_endgame(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        log::warn!("malformed endgame: expected 'endgame <gameId>'");
        return None;
    }
    Some(Command::EndGame {
        game_id: tokens[1].to_string(),
    })
}
