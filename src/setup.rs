//! Roster setup: building the 1-4 player list before the game starts.

use crate::engine::{EngineError, MAX_PLAYERS};
use crate::input::InputSource;
use crate::model::Player;
use std::io::{self, Write};
use tracing::{info, instrument};

/// Prompts for a player count and a name per player.
///
/// A count outside 1-4 (or not a number at all) re-prompts rather than
/// failing; roster setup follows the same never-fatal policy as
/// in-game input. Blank names default to `Player N`.
#[instrument(skip(input))]
pub fn prompt_players<I: InputSource>(input: &mut I) -> Result<Vec<Player>, EngineError> {
    let count = loop {
        print!("Enter number of players for this game (1-{MAX_PLAYERS}): ");
        io::stdout().flush().ok();
        let line = input.read_line()?;
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=MAX_PLAYERS).contains(&n) => break n,
            _ => println!("Please enter a number between 1 and {MAX_PLAYERS}."),
        }
    };

    let mut players = Vec::with_capacity(count);
    for i in 1..=count {
        print!("Enter name for Player {i}: ");
        io::stdout().flush().ok();
        let line = input.read_line()?;
        players.push(Player::new(i as u32, displayable_name(line.trim(), i)));
    }
    info!(count, "roster ready");
    Ok(players)
}

/// Builds a roster from preset names, e.g. a `--players` flag.
///
/// # Errors
///
/// Fails when the name list is empty or longer than [`MAX_PLAYERS`].
pub fn roster_from_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<Player>, EngineError> {
    if names.is_empty() || names.len() > MAX_PLAYERS {
        return Err(EngineError::BadRosterSize(names.len()));
    }
    Ok(names
        .iter()
        .enumerate()
        .map(|(i, name)| Player::new(i as u32 + 1, displayable_name(name.as_ref().trim(), i + 1)))
        .collect())
}

fn displayable_name(trimmed: &str, ordinal: usize) -> String {
    if trimmed.is_empty() {
        format!("Player {ordinal}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;

    #[test]
    fn bad_count_reprompts() {
        let mut input = ScriptedInput::new(["nine", "0", "2", "Alice", "Bob"]);
        let players = prompt_players(&mut input).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name(), "Alice");
        assert_eq!(players[1].name(), "Bob");
    }

    #[test]
    fn blank_name_gets_default() {
        let mut input = ScriptedInput::new(["1", "   "]);
        let players = prompt_players(&mut input).unwrap();
        assert_eq!(players[0].name(), "Player 1");
    }

    #[test]
    fn preset_roster_is_validated() {
        assert!(roster_from_names::<&str>(&[]).is_err());
        assert!(roster_from_names(&["a", "b", "c", "d", "e"]).is_err());
        let players = roster_from_names(&["Alice", "Bob"]).unwrap();
        assert_eq!(*players[1].id(), 2);
    }
}
